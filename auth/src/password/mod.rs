pub mod argon2;
pub mod cost;
pub mod errors;

pub use argon2::PasswordHasher;
pub use cost::HashCost;
pub use errors::PasswordError;
