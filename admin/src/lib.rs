pub mod errors;
pub mod gateway;
pub mod urls;
