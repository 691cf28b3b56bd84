use anyhow::Result;
use clap::Parser;

use huetune_catalog::Config;
use huetune_core::model::{ExplicitFilter, Rgb};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "huetune", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Recommend a playlist for an image signal
    ///
    /// Takes the object labels and dominant colour detected in an image and
    /// runs the full pipeline:
    ///
    /// - Expands the labels into contextual phrases and ranks the genre
    ///   vocabulary against them with embedding similarity
    /// - Maps the colour to energy, valence, and acousticness
    /// - Scores the labels against the mood categories
    /// - Fuses the three signals into one music profile
    /// - Searches the Spotify catalog with a cascade of genre, mood, and
    ///   year queries, then filters by popularity and explicit content
    ///
    /// Requires an Ollama server for embeddings and Spotify client
    /// credentials (see 'huetune config').
    Recommend {
        /// Detected object label (repeat for several labels)
        #[arg(long = "label", short = 'l', required = true)]
        labels: Vec<String>,

        /// Dominant colour as r,g,b
        #[arg(long, short = 'c')]
        color: Rgb,

        /// Number of tracks (default from config)
        #[arg(long, short = 'n')]
        size: Option<usize>,

        /// Explicit content filter: clean or any (default from config)
        #[arg(long)]
        explicit: Option<ExplicitFilter>,

        /// Print the profile and tracks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the offline colour and mood analysis for an image signal
    Profile {
        /// Detected object label (repeat for several labels)
        #[arg(long = "label", short = 'l')]
        labels: Vec<String>,

        /// Dominant colour as r,g,b
        #[arg(long, short = 'c')]
        color: Rgb,
    },
    /// Rank the genre vocabulary against free text
    Genres {
        /// Text to match
        text: String,

        /// Number of genres to show
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print one value, or the whole config file
    Get {
        /// Config key
        key: Option<String>,
    },
    /// Set a value in the config file
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            labels,
            color,
            size,
            explicit,
            json,
        } => {
            let config = Config::load()?;
            let request = commands::recommend::Request {
                labels,
                color,
                size,
                explicit,
                json,
            };
            commands::run_recommend(&config, request).await?;
        }
        Commands::Profile { labels, color } => {
            commands::show_profile(labels, color)?;
        }
        Commands::Genres { text, top } => {
            let config = Config::load()?;
            commands::rank_genres(&config, &text, top).await?;
        }
        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show_config()?,
            ConfigCommand::Get { key } => commands::config::get_config(key)?,
            ConfigCommand::Set { key, value } => commands::config::set_config(&key, &value)?,
            ConfigCommand::Path => commands::config::show_path()?,
            ConfigCommand::Example => commands::config::show_example()?,
            ConfigCommand::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
