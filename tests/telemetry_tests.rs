use chart_pipeline::telemetry::{DEFAULT_FILTER, init_default_tracing, init_tracing};

#[test]
fn tracing_installs_at_most_once() {
    let first = init_default_tracing();
    assert_eq!(first, cfg!(feature = "telemetry"));
    assert!(!init_tracing("debug"));
    assert!(DEFAULT_FILTER.starts_with("chart_pipeline"));
}
