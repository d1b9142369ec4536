use clap::Parser;
use ferrous_stub_domain::{CliOverrides, DnsQuery, DnsResponse, RecordType};
use ferrous_stub_infrastructure::{DnsClient, DnsClientOptions, TracingErrorLogger};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

mod bootstrap;

#[derive(Parser)]
#[command(name = "ferrous-stub")]
#[command(version)]
#[command(about = "Ferrous Stub - send one DNS query and print the answer")]
struct Cli {
    /// Domain name to look up
    domain: String,

    /// Record types to ask for (A, AAAA, MX, ...). Defaults to A
    #[arg(value_name = "TYPE")]
    types: Vec<RecordType>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream server (ip:port)
    #[arg(short = 's', long)]
    server: Option<String>,

    /// Server used for TCP fallback (ip:port)
    #[arg(long)]
    tcp_server: Option<String>,

    /// Datagrams sent before giving up
    #[arg(short = 'a', long)]
    attempts: Option<u16>,

    /// Wait per attempt, in milliseconds
    #[arg(short = 't', long)]
    timeout_ms: Option<u64>,

    /// Keep truncated answers instead of retrying over TCP
    #[arg(long)]
    no_tcp_fallback: bool,

    /// Return a truncated answer as-is for this query
    #[arg(long)]
    accept_truncated: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        server: cli.server.clone(),
        tcp_server: cli.tcp_server.clone(),
        max_attempts: cli.attempts,
        timeout_ms: cli.timeout_ms,
        no_tcp_fallback: cli.no_tcp_fallback,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::config::log_config(cli.config.as_deref(), &config);

    let types = if cli.types.is_empty() {
        vec![RecordType::A]
    } else {
        cli.types.clone()
    };
    let query = DnsQuery::with_types(&cli.domain, &types, cli.accept_truncated)?;

    let options = DnsClientOptions::from_config(&config.client, &config.upstream)?
        .with_error_logging(Arc::new(TracingErrorLogger));
    let client = DnsClient::connect(config.upstream.server_addr()?, options).await?;

    info!(domain = %query.domain(), types = ?types, "Sending query");
    let response = client.query(&query).await?;

    print_response(&query, &response);

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_response(query: &DnsQuery, response: &DnsResponse) {
    let mut flags = Vec::new();
    if response.authoritative {
        flags.push("aa");
    }
    if response.truncated {
        flags.push("tc");
    }
    if response.tcp_used {
        flags.push("tcp");
    }

    println!(
        ";; {} status: {} flags: [{}] answers: {}",
        query.domain(),
        response.error_code,
        flags.join(" "),
        response.records().len()
    );

    for record in response.records() {
        println!("{}", record);
    }
}
