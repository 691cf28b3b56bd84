use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::{value, DocumentMut};

use huetune_catalog::config::{self, CONFIG_KEYS};
use huetune_catalog::Config;
use huetune_core::model::ExplicitFilter;

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    for key in CONFIG_KEYS {
        println!("  {}: {}", key, display_value(&config, key).unwrap_or_default());
    }

    println!("\nPriority: CLI args > ENV vars (HUETUNE_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value, or the whole file without a key.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;
        let shown = display_value(&config, &key).with_context(|| unknown_key(&key))?;
        println!("{shown}");
    } else {
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{contents}");
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'huetune config init' to create it.");
        }
    }

    Ok(())
}

/// Set a config value.
pub fn set_config(key: &str, value: &str) -> Result<()> {
    let config_path = config::config_file_path();
    set_value_at(&config_path, key, value)?;

    println!("✓ Updated {key} = {}", redact(key, value));
    println!("  in {}", config_path.display());

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure huetune.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}

/// Validate `raw` for `key` and write it into the file at `config_path`,
/// creating the file from the example when missing. Comments and other
/// keys are preserved.
pub fn set_value_at(config_path: &Path, key: &str, raw: &str) -> Result<()> {
    let item = parse_value(key, raw)?;

    config::ensure_config_file_at(config_path)?;
    let contents = std::fs::read_to_string(config_path).context("Failed to read config file")?;
    let mut doc: DocumentMut = contents
        .parse()
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    doc[key] = item;

    std::fs::write(config_path, doc.to_string()).context("Failed to write config file")?;
    Ok(())
}

fn parse_value(key: &str, raw: &str) -> Result<toml_edit::Item> {
    match key {
        "playlist_size" => {
            let size: i64 = raw
                .parse()
                .with_context(|| format!("playlist_size must be a whole number, got '{raw}'"))?;
            if size < 1 {
                anyhow::bail!("playlist_size must be at least 1, got {size}");
            }
            Ok(value(size))
        }
        "explicit_filter" => {
            let filter: ExplicitFilter = raw.parse()?;
            Ok(value(filter.as_str()))
        }
        k if CONFIG_KEYS.contains(&k) => Ok(value(raw)),
        _ => anyhow::bail!(unknown_key(key)),
    }
}

fn display_value(config: &Config, key: &str) -> Option<String> {
    let shown = match key {
        "spotify_client_id" => config
            .spotify_client_id
            .clone()
            .unwrap_or_else(|| String::from("<not set>")),
        "spotify_client_secret" => match config.spotify_client_secret {
            Some(_) => String::from("<set>"),
            None => String::from("<not set>"),
        },
        "spotify_market" => config.spotify_market.clone(),
        "embedding_url" => config.embedding_url.clone(),
        "embedding_model" => config.embedding_model.clone(),
        "playlist_size" => config.playlist_size.to_string(),
        "explicit_filter" => config.explicit_filter.to_string(),
        _ => return None,
    };
    Some(shown)
}

fn redact<'a>(key: &str, value: &'a str) -> &'a str {
    if key == "spotify_client_secret" {
        "<hidden>"
    } else {
        value
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: {}\n\nValid keys: {}",
        key,
        CONFIG_KEYS.join(", ")
    )
}
