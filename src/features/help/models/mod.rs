mod urgency;

pub use urgency::Urgency;
