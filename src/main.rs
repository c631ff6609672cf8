use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use influx_entry::config::ProxyConfig;
use influx_entry::services::proxy;
use influx_entry::services::write::{HttpLineWriter, LineWriter, DEFAULT_ENDPOINT};
use influx_entry::{encode, EntryError, Pair, Record};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "influx-entry", about = "Compose InfluxDB line protocol and write it", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the write proxy in front of InfluxDB
    Serve(ProxyConfig),
    /// Print the line a record encodes to
    Encode(RecordArgs),
    /// Encode a record and post it to the write endpoint
    Submit(SubmitArgs),
}

#[derive(Args, Debug)]
struct RecordArgs {
    /// Measurement name
    #[arg(short, long, default_value = "")]
    measurement: String,

    /// Tag, repeatable
    #[arg(short, long = "tag", value_name = "KEY=VALUE")]
    tags: Vec<String>,

    /// Field, repeatable
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,
}

impl RecordArgs {
    fn record(&self) -> Record {
        Record {
            measurement: self.measurement.clone(),
            tags: self.tags.iter().map(|t| Pair::parse(t)).collect(),
            fields: self.fields.iter().map(|f| Pair::parse(f)).collect(),
        }
    }
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[command(flatten)]
    record: RecordArgs,

    /// Write endpoint (the proxy's /write-line-protocol)
    #[arg(long, env = "WRITE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Serve(config) => proxy::run(config).await.context("write proxy"),
        Commands::Encode(args) => run_encode(&args),
        Commands::Submit(args) => run_submit(&args).await,
    };
    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run_encode(args: &RecordArgs) -> Result<()> {
    let line = encode(&args.record())?;
    println!("{line}");
    Ok(())
}

async fn run_submit(args: &SubmitArgs) -> Result<()> {
    let line = encode(&args.record.record())?;
    tracing::debug!("submitting {}", line);

    let writer = HttpLineWriter::with_timeout(&args.endpoint, Duration::from_secs(args.timeout_secs));
    writer
        .write_line(&line)
        .await
        .map_err(EntryError::from)
        .with_context(|| format!("POST {}", writer.endpoint()))?;

    println!("Success!");
    Ok(())
}
