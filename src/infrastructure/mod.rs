pub mod config;
pub mod photo;
pub mod store;
