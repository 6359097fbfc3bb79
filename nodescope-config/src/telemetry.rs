//! Telemetry selection configuration.
//!
//! Parameters deciding which telemetry is collected:
//! - Meters and per-domain trackers
//! - gRPC method labels
//! - Queue and message type label mapping
//! - Expected scrape interval

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use figment::providers::Serialized;
use figment::value::{Dict, Value};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use validator::Validate;

use crate::category::{
    Cache, Checkpoint, EventTracker, Gossip, GrpcMethod, IncomingGrpcCall, KestrelTracker,
    ProcessTracker, StatusTracker, SystemTracker, WriterTracker,
};
use crate::document::{ConfigFile, DocumentSource};
use crate::labels::{LabelMapper, LabelMappingCase};
use crate::locator::{self, PlatformSearchRoots, SearchRoots, DEFAULT_FILE_NAME};
use crate::tables::{SelectionList, ToggleTable};
use crate::{validation, ConfigError};

/// Telemetry configuration.
///
/// Every field is optional in the document; absent fields bind to an empty
/// list or table and a scrape interval of `0`. Keys are matched without
/// regard to ASCII case and serialize back in PascalCase.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "PascalCase")]
pub struct TelemetryConfig {
    /// Names of the meters to publish.
    pub meters: Vec<String>,

    pub status_trackers: SelectionList<StatusTracker>,

    pub checkpoints: SelectionList<Checkpoint>,

    pub incoming_grpc_calls: ToggleTable<IncomingGrpcCall>,

    /// Duration label per gRPC method. A blank label leaves the method untracked.
    pub grpc_methods: BTreeMap<GrpcMethod, String>,

    pub gossip_trackers: SelectionList<Gossip>,

    pub kestrel: ToggleTable<KestrelTracker>,

    pub system: ToggleTable<SystemTracker>,

    pub process: ToggleTable<ProcessTracker>,

    pub writer: ToggleTable<WriterTracker>,

    pub events: ToggleTable<EventTracker>,

    pub cache_hits_misses: ToggleTable<Cache>,

    /// Seconds between scrapes by the metrics collector. `0` when not configured.
    ///
    /// Written as a number or a numeric string; values outside `i32` are malformed.
    #[serde(deserialize_with = "deserialize_seconds")]
    #[validate(custom(function = validation::validate_scrape_interval))]
    pub expected_scrape_interval_seconds: i32,

    /// Label mapping cases for queue names.
    pub queues: Vec<LabelMappingCase>,

    /// Label mapping cases for message type names.
    pub message_types: Vec<LabelMappingCase>,
}

impl TelemetryConfig {
    /// Binds a generic configuration tree into the typed schema and validates it.
    ///
    /// Stops at the first error: an unknown category name, a value of the
    /// wrong shape, or a rejected scrape interval.
    pub fn bind(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = canonicalize_keys(figment)?.extract()?;
        // The scrape interval is the only field with a value rule.
        config
            .validate()
            .map_err(|_| ConfigError::InvalidScrapeInterval {
                value: config.expected_scrape_interval_seconds.into(),
            })?;
        Ok(config)
    }

    /// Loads and binds a document from any source.
    pub fn from_source(source: &impl DocumentSource) -> Result<Self, ConfigError> {
        Self::bind(&source.load()?)
    }

    /// Locates `telemetryconfig.json` in the platform search roots and loads it.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_FILE_NAME, &PlatformSearchRoots::default())
    }

    /// Locates `target` (a file name, relative path or absolute path) among
    /// `roots` and loads it.
    pub fn load_from<R>(target: impl AsRef<Path>, roots: &R) -> Result<Self, ConfigError>
    where
        R: SearchRoots + ?Sized,
    {
        let target = target.as_ref();
        let directory = locator::locate(target, roots)?;
        Self::from_source(&ConfigFile::new(directory, target))
    }

    pub fn meter_enabled(&self, meter: &str) -> bool {
        self.meters.iter().any(|name| name == meter)
    }

    pub fn status_tracker_enabled(&self, tracker: StatusTracker) -> bool {
        self.status_trackers.contains(tracker)
    }

    pub fn checkpoint_enabled(&self, checkpoint: Checkpoint) -> bool {
        self.checkpoints.contains(checkpoint)
    }

    pub fn gossip_enabled(&self, gossip: Gossip) -> bool {
        self.gossip_trackers.contains(gossip)
    }

    /// Display label for `method`, or `None` when the method is not tracked.
    pub fn grpc_method_label(&self, method: GrpcMethod) -> Option<&str> {
        self.grpc_methods
            .get(&method)
            .map(String::as_str)
            .filter(|label| !label.trim().is_empty())
    }

    /// Expected scrape interval, or `None` when not configured.
    pub fn expected_scrape_interval(&self) -> Option<Duration> {
        u64::try_from(self.expected_scrape_interval_seconds)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Compiles the queue label mapping cases.
    pub fn queue_labels(&self) -> Result<LabelMapper, ConfigError> {
        LabelMapper::new(&self.queues)
    }

    /// Compiles the message type label mapping cases.
    pub fn message_type_labels(&self) -> Result<LabelMapper, ConfigError> {
        LabelMapper::new(&self.message_types)
    }
}

/// Top-level document keys in their canonical spelling.
const DOCUMENT_KEYS: [&str; 15] = [
    "Meters",
    "StatusTrackers",
    "Checkpoints",
    "IncomingGrpcCalls",
    "GrpcMethods",
    "GossipTrackers",
    "Kestrel",
    "System",
    "Process",
    "Writer",
    "Events",
    "CacheHitsMisses",
    "ExpectedScrapeIntervalSeconds",
    "Queues",
    "MessageTypes",
];

const LABEL_CASE_KEYS: [&str; 2] = ["Regex", "Label"];

fn canonical_key<'a>(keys: &[&'a str], key: &str) -> Option<&'a str> {
    keys.iter()
        .copied()
        .find(|canonical| canonical.eq_ignore_ascii_case(key))
}

/// Re-keys entries spelled in another case onto their canonical key.
///
/// Rewritten entries are merged over the source, so entries that were
/// already canonical keep their source metadata in error reports.
fn canonicalize_keys(figment: &Figment) -> Result<Figment, ConfigError> {
    let document: Dict = figment.extract()?;
    let mut rewritten = Dict::new();

    for (key, value) in document {
        let Some(canonical) = canonical_key(&DOCUMENT_KEYS, &key) else {
            debug!(key = %key, "ignoring unrelated configuration key");
            continue;
        };
        let (value, relabeled) = match canonical {
            "Queues" | "MessageTypes" => canonicalize_label_cases(value),
            _ => (value, false),
        };
        if key != canonical || relabeled {
            rewritten.insert(canonical.to_string(), value);
        }
    }

    if rewritten.is_empty() {
        return Ok(figment.clone());
    }
    Ok(figment.clone().merge(Serialized::defaults(rewritten)))
}

fn canonicalize_label_cases(value: Value) -> (Value, bool) {
    let (tag, cases) = match value {
        Value::Array(tag, cases) => (tag, cases),
        other => return (other, false),
    };

    let mut relabeled = false;
    let cases = cases
        .into_iter()
        .map(|case| match case {
            Value::Dict(tag, fields) => {
                let fields = fields
                    .into_iter()
                    .map(|(key, value)| match canonical_key(&LABEL_CASE_KEYS, &key) {
                        Some(canonical) if canonical != key => {
                            relabeled = true;
                            (canonical.to_string(), value)
                        }
                        _ => (key, value),
                    })
                    .collect();
                Value::Dict(tag, fields)
            }
            other => other,
        })
        .collect();

    (Value::Array(tag, cases), relabeled)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SecondsValue {
    Num(i32),
    Str(String),
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    match SecondsValue::deserialize(deserializer)? {
        SecondsValue::Num(seconds) => Ok(seconds),
        SecondsValue::Str(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
