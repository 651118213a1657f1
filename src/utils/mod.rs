//! Utility modules

mod logger;

pub use logger::init_logger;
