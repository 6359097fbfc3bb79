//! # NodeScope Telemetry Configuration
//!
//! Discovery, loading and validation of a node's telemetry configuration
//! document, and the typed schema that tells the metrics pipeline which
//! telemetry to collect.
//!
//! ## Flow
//! 1. [`locate`] resolves the directory holding the configuration file,
//!    either from an absolute path or by probing [`SearchRoots`] in order.
//! 2. A [`DocumentSource`] loads the file into a generic figment tree.
//! 3. [`TelemetryConfig::bind`] binds the tree into the typed schema and
//!    validates the scrape interval.
//!
//! The bound config is immutable and can be shared freely between threads.
//!
//! ```no_run
//! use nodescope_config::{SystemTracker, TelemetryConfig};
//!
//! let config = TelemetryConfig::load()?;
//! if config.system.is_enabled(SystemTracker::Cpu) {
//!     // register the CPU gauge
//! }
//! # Ok::<(), nodescope_config::ConfigError>(())
//! ```

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod category;
mod document;
mod error;
mod labels;
mod locator;
mod tables;
mod telemetry;
mod validation;

pub use category::{
    Cache, Category, Checkpoint, EventTracker, Gossip, GrpcMethod, IncomingGrpcCall,
    KestrelTracker, ProcessTracker, StatusTracker, SystemTracker, UnknownMember, WriterTracker,
};
pub use document::{ConfigFile, DocumentFormat, DocumentSource, JsonDocument};
pub use error::ConfigError;
pub use labels::{LabelMapper, LabelMappingCase};
pub use locator::{
    locate, locate_with, PlatformSearchRoots, SearchRoots, APP_DIR_NAME, DEFAULT_FILE_NAME,
};
pub use tables::{SelectionList, ToggleTable};
pub use telemetry::TelemetryConfig;
pub use validation::{is_valid_scrape_interval, SCRAPE_INTERVAL_RULE};
