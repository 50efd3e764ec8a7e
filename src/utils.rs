pub mod client;
pub mod color;
pub mod convert;
pub mod logger;
