pub mod builder;
pub mod client;
pub mod error;
pub mod solana;

pub use builder::ClientBuilder;
pub use client::{ClientConfig, RecordClient};
