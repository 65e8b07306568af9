mod help_handler;

pub use help_handler::*;
