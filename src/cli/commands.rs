//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::config::StoryConfig;
use crate::error::{Result, StoryError};
use crate::host::{BlockId, DocumentFile, HostEditor, InMemoryHost};
use crate::settings::{SettingsPatch, StorySettings};
use crate::snap::{snap_targets_for_block, SnapTargets};
use crate::store::{Action, StoryStore};

/// Result of replaying actions against a document
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub actions: usize,
    pub store: StoryStore,
    pub document: DocumentFile,
}

/// Load the configuration file, or the defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<StoryConfig> {
    match path {
        Some(path) => {
            info!("Loading config: {}", path.display());
            StoryConfig::load(path)
        }
        None => Ok(StoryConfig::default()),
    }
}

/// Read a JSON array of actions
pub fn load_actions(path: &Path) -> Result<Vec<Action>> {
    if !path.exists() {
        return Err(StoryError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Dispatch every action against the document and report the outcome.
pub fn replay_actions(
    config: &StoryConfig,
    document: &Path,
    actions: &Path,
    save: bool,
) -> Result<ReplayReport> {
    info!("Replaying {} against {}", actions.display(), document.display());

    let mut host = InMemoryHost::load(document)?;
    let actions = load_actions(actions)?;

    let mut store = StoryStore::with_attribute_names(config.attributes.clone());
    store.dispatch_all(&mut host, &actions);

    if save {
        host.save(document)?;
        info!("Saved document: {}", document.display());
    }

    Ok(ReplayReport {
        actions: actions.len(),
        store,
        document: host.to_document(),
    })
}

/// Replay actions and print the resulting state.
pub fn replay(config: &StoryConfig, document: &Path, actions: &Path, save: bool) -> Result<()> {
    let report = replay_actions(config, document, actions, save)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Compute the snap targets for `block`.
pub fn block_snap_targets(
    config: &StoryConfig,
    document: &Path,
    block: &str,
    page: Option<&str>,
) -> Result<SnapTargets> {
    let host = InMemoryHost::load(document)?;
    let block = BlockId::new(block);

    if !host.has_block(&block) {
        return Err(StoryError::BlockNotFound {
            block: block.to_string(),
        });
    }

    let current_page = match page {
        Some(page) => Some(BlockId::new(page)),
        None => host.block_root(&block),
    };

    let targets = snap_targets_for_block(&host, current_page.as_ref(), config.page, &block);
    if targets.is_empty() {
        warn!("No snap targets for {}: block is not laid out on the current page", block);
    }

    Ok(targets)
}

/// Print the snap targets for a block.
pub fn snaps(config: &StoryConfig, document: &Path, block: &str, page: Option<&str>) -> Result<()> {
    let targets = block_snap_targets(config, document, block, page)?;
    println!("{}", serde_json::to_string_pretty(&targets)?);
    Ok(())
}

/// Apply a settings patch (if any) and return the resulting settings.
pub fn apply_settings(document: &Path, patch: &SettingsPatch) -> Result<StorySettings> {
    let mut host = InMemoryHost::load(document)?;

    if patch == &SettingsPatch::default() {
        return Ok(StorySettings::load(&host));
    }

    info!("Updating story settings in: {}", document.display());
    let settings = StorySettings::update_meta(&mut host, patch)?;
    host.save(document)?;
    Ok(settings)
}

/// Show or update the story settings.
pub fn settings(config: &StoryConfig, document: &Path, patch: &SettingsPatch) -> Result<()> {
    let settings = apply_settings(document, patch)?;

    match settings.current_option(&config.auto_advance_options) {
        Some(option) => {
            println!("Advance to next page: {}", option.label);
            if !option.description.is_empty() {
                println!("  {}", option.description);
            }
        }
        None => println!("Advance to next page: (not set)"),
    }

    if settings.uses_duration() {
        println!("Time in seconds: {}", settings.auto_advance_after_duration);
    }

    Ok(())
}
