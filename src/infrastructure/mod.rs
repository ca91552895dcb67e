pub mod encoding;
pub mod gateway;
pub mod observability;
pub mod staging;
