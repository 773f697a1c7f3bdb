mod client;
pub use client::GenAiClient;
pub mod methods;
pub mod types;
