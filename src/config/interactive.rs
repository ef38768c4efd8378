use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};

use super::{Config, OllamaConfig, SimilarityMode, get_config_dir};
use crate::scoring::ollama::OllamaClient;

#[inline]
pub fn run_interactive_config() -> Result<()> {
    eprintln!(
        "{}",
        style("🔧 Resume Screener Configuration Setup").bold().cyan()
    );
    eprintln!();

    let mut config = Config::load().unwrap_or_default();

    eprintln!("{}", style("Scoring Configuration").bold().yellow());
    configure_scoring(&mut config)?;

    if config.scoring.mode == SimilarityMode::Semantic {
        eprintln!();
        eprintln!("{}", style("Ollama Configuration").bold().yellow());
        eprintln!("Configure your local Ollama instance for embedding generation.");
        eprintln!();

        configure_ollama(&mut config.ollama)?;

        eprintln!();
        eprintln!("{}", style("Testing configuration...").yellow());

        if test_ollama_connection(&config.ollama) {
            eprintln!("{}", style("✓ Ollama connection successful!").green());
        } else {
            eprintln!(
                "{}",
                style("⚠ Warning: Could not connect to Ollama").yellow()
            );
            eprintln!("You can continue, but make sure Ollama is running before screening.");
        }
    }

    eprintln!();
    if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save().context("Failed to save configuration")?;
        eprintln!("{}", style("✓ Configuration saved successfully!").green());

        let config_path = get_config_dir()?.join("config.toml");
        eprintln!(
            "Configuration saved to: {}",
            style(config_path.display()).cyan()
        );
    } else {
        eprintln!("Configuration not saved.");
    }

    Ok(())
}

#[inline]
pub fn show_config() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    println!("{}", style("Current Configuration").bold().cyan());
    println!();
    println!("Scoring:");
    println!("  Mode: {}", config.scoring.mode);
    println!("  Similarity weight: {}", config.scoring.similarity_weight);
    println!("  Skill weight: {}", config.scoring.skill_weight);
    println!();
    println!("Skills:");
    println!("  Vocabulary terms: {}", config.skills.vocabulary.len());
    println!();
    println!("Ollama:");
    println!("  Protocol: {}", config.ollama.protocol);
    println!("  Host: {}", config.ollama.host);
    println!("  Port: {}", config.ollama.port);
    println!("  Model: {}", config.ollama.model);
    println!("  Batch size: {}", config.ollama.batch_size);

    let config_path = get_config_dir()?.join("config.toml");
    println!();
    if config_path.exists() {
        println!("Config file: {}", config_path.display());
    } else {
        println!("Config file: (not saved yet, showing defaults)");
    }

    Ok(())
}

fn configure_scoring(config: &mut Config) -> Result<()> {
    let modes = ["lexical (term frequency)", "semantic (Ollama embeddings)"];
    let default_index = match config.scoring.mode {
        SimilarityMode::Lexical => 0,
        SimilarityMode::Semantic => 1,
    };

    let selection = Select::new()
        .with_prompt("Similarity mode")
        .items(&modes)
        .default(default_index)
        .interact()?;

    config.scoring.mode = if selection == 0 {
        SimilarityMode::Lexical
    } else {
        SimilarityMode::Semantic
    };

    config.scoring.similarity_weight = Input::new()
        .with_prompt("Similarity weight")
        .default(config.scoring.similarity_weight)
        .validate_with(|value: &f64| {
            if value.is_finite() && *value >= 0.0 {
                Ok(())
            } else {
                Err("Weight must be finite and non-negative")
            }
        })
        .interact_text()?;

    config.scoring.skill_weight = Input::new()
        .with_prompt("Skill match weight")
        .default(config.scoring.skill_weight)
        .validate_with(|value: &f64| {
            if value.is_finite() && *value >= 0.0 {
                Ok(())
            } else {
                Err("Weight must be finite and non-negative")
            }
        })
        .interact_text()?;

    Ok(())
}

fn configure_ollama(config: &mut OllamaConfig) -> Result<()> {
    let host: String = Input::new()
        .with_prompt("Ollama host")
        .default(config.host.clone())
        .interact_text()?;
    config.set_host(host)?;

    let port: u16 = Input::new()
        .with_prompt("Ollama port")
        .default(config.port)
        .interact_text()?;
    config.set_port(port)?;

    let model: String = Input::new()
        .with_prompt("Embedding model")
        .default(config.model.clone())
        .interact_text()?;
    config.set_model(model)?;

    Ok(())
}

fn test_ollama_connection(config: &OllamaConfig) -> bool {
    match OllamaClient::new(config) {
        Ok(client) => client.health_check().is_ok(),
        Err(_) => false,
    }
}
