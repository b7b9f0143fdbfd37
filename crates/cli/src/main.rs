use clap::Parser;
use dnslookup_application::ports::LookupOptions;
use dnslookup_domain::CliOverrides;
use std::net::IpAddr;
use std::process::ExitCode;
use tracing::{debug, info};

mod bootstrap;
mod di;
mod output;

#[derive(Parser)]
#[command(name = "dnslookup")]
#[command(version)]
#[command(about = "Resolve a hostname with a single UDP query, following CNAME chains")]
struct Cli {
    /// Hostname to resolve
    name: String,

    /// Nameserver to query instead of the configured ones
    #[arg(short = 's', long)]
    server: Option<IpAddr>,

    /// Destination port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Give up after this many milliseconds
    #[arg(short = 't', long)]
    timeout_ms: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        timeout_ms: cli.timeout_ms,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    debug!("dnslookup v{}", env!("CARGO_PKG_VERSION"));

    let services = di::LookupServices::new(&config).await?;

    let mut options = LookupOptions::default();
    if let Some(server) = cli.server {
        options = options.with_server(server);
    }

    info!(name = %cli.name, "Resolving");

    match services.resolver.lookup(&cli.name, options).await {
        Ok(answers) => {
            println!("{}", output::render_answers(&answers));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", output::render_error(&e));
            Ok(ExitCode::from(e.code().as_u8()))
        }
    }
}
