use clap::{Parser, Subcommand};
use edgedig_application::ports::DnsExchangePort;
use edgedig_domain::{CliOverrides, RecordType};
use edgedig_infrastructure::dns::HickoryDnsExchange;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "edgedig")]
#[command(version)]
#[command(about = "Resolve names to IPv4 addresses through a list of edge DNS servers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Edge DNS server (host:port), tried in the order given
    #[arg(short = 's', long = "server", value_name = "HOST:PORT", global = true)]
    servers: Vec<String>,

    /// Per-server query timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Follow CNAMEs and print every IPv4 address, one per line
    Dig {
        /// Name to resolve
        name: String,
    },
    /// Send a single query with failover and print the answer section
    Exchange {
        /// Name to query
        name: String,

        /// Record type
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: RecordType,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        servers: cli.servers,
        query_timeout_ms: cli.timeout_ms,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    let servers = config.resolver.server_list()?;
    let timeout = Duration::from_millis(config.resolver.query_timeout_ms);
    debug!(
        servers = %servers,
        timeout_ms = config.resolver.query_timeout_ms,
        "Edge servers configured"
    );

    let port: Arc<dyn DnsExchangePort> = Arc::new(HickoryDnsExchange::with_timeout(timeout));

    match cli.command {
        Command::Dig { name } => {
            let ips =
                commands::dig(port, config.resolver.max_cname_depth, &name, &servers).await?;
            for ip in ips {
                println!("{}", ip);
            }
        }
        Command::Exchange { name, record_type } => {
            let answer = commands::exchange(port, &name, record_type, &servers).await?;
            println!(
                ";; status: {}, id: {}, answers: {}",
                answer.rcode,
                answer.id,
                answer.answers.len()
            );
            for record in &answer.answers {
                println!("{}", record);
            }
        }
    }

    Ok(())
}
