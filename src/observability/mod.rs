//! Observability module
//!
//! Tracing setup and span helpers shared by the library and the driver.

pub mod telemetry;
