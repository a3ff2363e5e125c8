pub mod client;
pub mod models;

pub use client::FraudProofClient;
pub use models::ApiError;
