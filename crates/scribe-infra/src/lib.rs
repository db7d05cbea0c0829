//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`, plus
//! tracing subscriber setup shared by the binaries.

pub mod memory;
pub mod telemetry;

pub use memory::{
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryStore, InMemoryUserRepository,
};
pub use telemetry::{TelemetryConfig, init_telemetry};
