//! Structured summary of the telemetry a config selects.

use nodescope_config::{Category, SelectionList, TelemetryConfig, ToggleTable};
use tracing::info_span;

fn toggled<C: Category>(table: &ToggleTable<C>) -> String {
    table.enabled().map(C::name).collect::<Vec<_>>().join(",")
}

fn listed<C: Category>(list: &SelectionList<C>) -> String {
    list.as_slice()
        .iter()
        .map(|member| member.name())
        .collect::<Vec<_>>()
        .join(",")
}

/// Logs, at info level, every category the config enables.
pub fn log_selection(config: &TelemetryConfig) {
    let span = info_span!(
        "telemetry_selection",
        scrape_interval_secs = config.expected_scrape_interval_seconds
    );
    let _entered = span.enter();

    let grpc_methods = config
        .grpc_methods
        .keys()
        .filter_map(|method| {
            config
                .grpc_method_label(*method)
                .map(|label| format!("{method}={label}"))
        })
        .collect::<Vec<_>>()
        .join(",");

    tracing::info!(
        meters = %config.meters.join(","),
        status_trackers = %listed(&config.status_trackers),
        checkpoints = %listed(&config.checkpoints),
        gossip = %listed(&config.gossip_trackers),
        grpc_methods = %grpc_methods,
        "telemetry selection loaded"
    );
    tracing::info!(
        incoming_grpc_calls = %toggled(&config.incoming_grpc_calls),
        kestrel = %toggled(&config.kestrel),
        system = %toggled(&config.system),
        process = %toggled(&config.process),
        writer = %toggled(&config.writer),
        events = %toggled(&config.events),
        cache_hits_misses = %toggled(&config.cache_hits_misses),
        "enabled trackers"
    );
    tracing::debug!(
        queue_cases = config.queues.len(),
        message_type_cases = config.message_types.len(),
        "label mapping cases"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodescope_config::JsonDocument;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn selection_report_lists_enabled_categories() {
        let config = TelemetryConfig::from_source(&JsonDocument(
            r#"{
                "StatusTrackers": ["Node"],
                "System": { "Cpu": true, "FreeMem": false },
                "GrpcMethods": { "StreamRead": "read", "StreamDelete": "" },
                "ExpectedScrapeIntervalSeconds": 45
            }"#
            .into(),
        ))
        .unwrap();

        log_selection(&config);

        assert!(logs_contain("telemetry selection loaded"));
        assert!(logs_contain("status_trackers=Node"));
        assert!(logs_contain("system=Cpu"));
        assert!(!logs_contain("FreeMem"));
        assert!(logs_contain("grpc_methods=StreamRead=read"));
        assert!(!logs_contain("StreamDelete"));
        assert!(logs_contain("scrape_interval_secs=45"));
    }
}
