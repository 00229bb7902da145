pub mod client;
pub mod provider;

pub use client::PredictorClient;
pub use provider::WinPredictor;
