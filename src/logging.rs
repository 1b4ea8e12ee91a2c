// 📝 Logging - tracing subscriber setup shared by both binaries

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber filtered by `filter` (RUST_LOG syntax).
/// Stdout stays reserved for command output.
pub fn init_logging(filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter `{filter}`"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))?;

    Ok(())
}
