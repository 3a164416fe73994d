//! Remote text-generation clients.

pub mod worker_api_client;

pub use worker_api_client::WorkerApiClient;
