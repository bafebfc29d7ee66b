pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod metrics;
pub mod persistence;
pub mod request_log;
pub mod routes;
pub mod server;
pub mod store;
pub mod utils;
pub use shared::{models::*, error::*, validation::*};
