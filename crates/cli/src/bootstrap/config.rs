use ferrous_stub_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    Ok(Config::load(config_path, cli_overrides)?)
}

pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        server = %config.upstream.server,
        tcp_server = config.upstream.tcp_server.as_deref().unwrap_or("same as server"),
        max_attempts = config.client.max_attempts,
        timeout_ms = config.client.timeout_ms,
        tcp_fallback = config.client.tcp_fallback,
        "Configuration loaded"
    );
}
