pub mod error;
pub mod models;
pub mod validation;

pub use error::ErrorResponse;
pub use models::*;
pub use validation::{ValidationError, ValidationPolicy, VoteFields};

#[cfg(test)]
mod tests;
