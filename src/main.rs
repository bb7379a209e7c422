//! mythroll - Blind Mythos dice roller

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use mythroll::dice::RngRandomizer;
use mythroll::system::HELP_MESSAGE;
use mythroll::{GameSystem, Server, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Blind Mythos judgment rolls, rerolls and tables
#[derive(Parser, Debug)]
#[command(name = "mythroll", version, about = "Blind Mythos dice roller")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one or more commands (e.g. "BMS2>=1", "ReRoll2,3>=1", "RP123")
    Roll {
        /// Commands to evaluate, in order
        #[arg(required = true)]
        commands: Vec<String>,

        /// Seed for reproducible rolls (overrides the configured seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Print each reply as a JSON line
        #[arg(long)]
        json: bool,
    },
    /// Print the command reference
    HelpText,
    /// Serve the HTTP API
    Serve {
        /// Listen address (overrides the configured one)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_tracing(args.log_json);

    let mut settings = Settings::load(args.config.as_deref())?;

    match args.command {
        Command::Roll {
            commands,
            seed,
            json,
        } => roll(&settings, &commands, seed.or(settings.seed), json),
        Command::HelpText => {
            print!("{}", HELP_MESSAGE);
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                settings.bind_addr = bind;
            }

            let server = Arc::new(Server::new(settings));
            let signal_server = server.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    signal_server.shutdown();
                }
            });

            server.run().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Evaluate commands; exit code 1 when any verdict fails or nothing matched
fn roll(
    settings: &Settings,
    commands: &[String],
    seed: Option<u64>,
    json: bool,
) -> Result<ExitCode> {
    let system = GameSystem::new(settings.judgment);
    let mut randomizer = RngRandomizer::from_seed_option(seed);
    let mut all_passed = true;

    for command in commands {
        let reply = match system.evaluate(command, &mut randomizer)? {
            Some(reply) => reply,
            None if commands.len() == 1 => bail!("unrecognized command: {}", command),
            None => {
                eprintln!("unrecognized command: {}", command);
                all_passed = false;
                continue;
            }
        };

        if reply.condition == Some(false) {
            all_passed = false;
        }

        if json {
            println!("{}", serde_json::to_string(&reply)?);
        } else {
            println!("{}", reply.text);
        }
    }

    Ok(if all_passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(json: bool) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "mythroll=info,tower_http=debug".into()),
    );

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
