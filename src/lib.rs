//! src/lib.rs
pub mod configuration;
pub mod domain;
pub mod error;
pub mod routes;
pub mod sms_client;
pub mod startup;
pub mod subscriber_store;
pub mod telemetry;
pub mod utils;
