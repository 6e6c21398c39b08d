use airwave_sim::{Runner, Script, SimConfig};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "airwave-sim")]
#[command(about = "Airwave player simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario script (the built-in demo when none is given)
    Run {
        /// Scenario script
        #[arg(value_name = "SCRIPT")]
        script: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long, env = "AIRWAVE_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the built-in demo script
    DemoScript,

    /// Print the effective configuration
    ShowConfig {
        /// Configuration file path
        #[arg(short, long, env = "AIRWAVE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airwave_sim=info,airwave_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { script, config } => {
            let config = SimConfig::load(config.as_deref()).context("Failed to load config")?;

            let script = match script.or_else(|| config.simulation.script.clone()) {
                Some(path) => Script::from_file(&path)
                    .with_context(|| format!("Failed to load script {}", path.display()))?,
                None => Script::demo()?,
            };

            let summary = Runner::new(config).run(&script).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::DemoScript => {
            print!("{}", Script::demo_source());
        }
        Commands::ShowConfig { config } => {
            let config = SimConfig::load(config.as_deref()).context("Failed to load config")?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
