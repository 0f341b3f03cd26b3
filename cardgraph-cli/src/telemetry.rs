use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber, writing to stderr.
///
/// A non-empty `RUST_LOG` is used as-is. Otherwise library and binary logs
/// default to `info`, or `debug` when `verbose` is set.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter(verbose, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn filter(verbose: bool, rust_log: Option<&str>) -> anyhow::Result<EnvFilter> {
    if let Some(spec) = rust_log.filter(|s| !s.trim().is_empty()) {
        return Ok(EnvFilter::try_new(spec)?);
    }
    let level = if verbose { "debug" } else { "info" };
    Ok(EnvFilter::try_new(format!(
        "cardgraph_rs={level},cardgraph_cli={level}"
    ))?)
}
