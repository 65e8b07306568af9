mod service;

pub use service::{NewServiceRecord, ServiceRecord};
