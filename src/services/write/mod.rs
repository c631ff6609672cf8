pub mod client;

pub use client::{HttpLineWriter, LineWriter, WriteError, DEFAULT_ENDPOINT};
