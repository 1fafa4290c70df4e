pub mod brand;
pub mod client;
pub mod context;
pub mod error;
pub mod tasks;

pub use client::YgmClient;
pub use error::ApiError;
