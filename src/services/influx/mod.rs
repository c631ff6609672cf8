pub mod client;

pub use client::{HealthCheck, InfluxClient, InfluxError};
