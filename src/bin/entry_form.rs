use clap::Parser;
use influx_entry::form::command::{apply, parse_command, render, Applied, HELP};
use influx_entry::services::write::{HttpLineWriter, DEFAULT_ENDPOINT};
use influx_entry::FormSession;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Interactive terminal form for composing and sending line protocol.
#[derive(Parser, Debug)]
#[command(name = "entry-form", version)]
struct Args {
    /// Write endpoint (the proxy's /write-line-protocol)
    #[arg(long, env = "WRITE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let writer = HttpLineWriter::new(&args.endpoint);
    let mut session = FormSession::new();

    println!("InfluxDB Line Protocol Entry -> {}", writer.endpoint());
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let applied = match parse_command(&line).and_then(|cmd| apply(&mut session, cmd)) {
            Ok(applied) => applied,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match applied {
            Applied::Edited => {}
            Applied::Show => println!("{}", render(&session)),
            Applied::Suggestions(options) => {
                for (i, option) in options.iter().enumerate() {
                    println!("  #{} {}", i + 1, option);
                }
            }
            Applied::Submit => println!("{}", session.submit(&writer).await),
            Applied::Help => println!("{HELP}"),
            Applied::Quit => break,
        }
    }

    Ok(())
}
