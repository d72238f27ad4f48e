//! DevMate Observability - tracing setup shared by the relay server and CLI
//!
//! Console logging through `tracing-subscriber`, with optional OpenTelemetry
//! OTLP export when an endpoint is configured.
//!
//! # Quick Start
//!
//! ```no_run
//! use devmate_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("devmate-server")
//!     .with_log_level("info");
//! init(config)?;
//!
//! tracing::info!("Service started");
//! # Ok::<(), devmate_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use tracing::{record_duration, record_error};
