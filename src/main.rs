//! Story Editor CLI
//!
//! Command-line interface for the story editor store.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use story_editor::cli::{commands, Cli, Commands};
use story_editor::settings::SettingsPatch;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Story Editor v{}", env!("CARGO_PKG_VERSION"));

    let config = commands::load_config(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Some(cmd) => handle_command(&config, cmd),
        None => {
            println!("Story Editor v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(config: &story_editor::StoryConfig, cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Replay {
            document,
            actions,
            save,
        } => commands::replay(config, &document, &actions, save)
            .with_context(|| format!("replay failed for {}", document.display())),
        Commands::Snaps {
            document,
            block,
            page,
        } => commands::snaps(config, &document, &block, page.as_deref())
            .with_context(|| format!("could not compute snap targets for {}", block)),
        Commands::Settings {
            document,
            set_option,
            set_duration,
        } => {
            let patch = SettingsPatch {
                auto_advance_after: set_option,
                auto_advance_after_duration: set_duration,
            };
            commands::settings(config, &document, &patch)
                .with_context(|| format!("settings update failed for {}", document.display()))
        }
    }
}
