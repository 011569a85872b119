//! Story editor configuration
//!
//! Page geometry, the attribute names the animation store writes through
//! to the host, and the auto-advance options offered by the settings panel.
//! Every field has a default so a config file only needs the overrides.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoryError};

/// Inner width of a story page in pixels
pub const STORY_PAGE_INNER_WIDTH: f64 = 328.0;

/// Inner height of a story page in pixels
pub const STORY_PAGE_INNER_HEIGHT: f64 = 553.0;

/// Width and height of a page's content area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for PageDimensions {
    fn default() -> Self {
        Self {
            width: STORY_PAGE_INNER_WIDTH,
            height: STORY_PAGE_INNER_HEIGHT,
        }
    }
}

/// Block attribute names written by the animation store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeNames {
    /// Attribute holding the anchor of the block to animate after
    pub animation_after: String,
    /// Attribute holding a block's anchor name
    pub anchor: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            animation_after: "ampAnimationAfter".to_string(),
            anchor: "anchor".to_string(),
        }
    }
}

/// One choice of the "advance to next page" setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoAdvanceOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl AutoAdvanceOption {
    pub fn new(value: &str, label: &str, description: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub page: PageDimensions,
    pub attributes: AttributeNames,
    pub auto_advance_options: Vec<AutoAdvanceOption>,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            page: PageDimensions::default(),
            attributes: AttributeNames::default(),
            auto_advance_options: default_auto_advance_options(),
        }
    }
}

impl StoryConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StoryError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        let config: StoryConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject page dimensions the snap helper can't work with
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [("page.width", self.page.width), ("page.height", self.page.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StoryError::InvalidSetting {
                    key: key.to_string(),
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }
        Ok(())
    }
}

fn default_auto_advance_options() -> Vec<AutoAdvanceOption> {
    vec![
        AutoAdvanceOption::new(
            "auto",
            "Automatic",
            "Based on the duration of all animated blocks on the page",
        ),
        AutoAdvanceOption::new("time", "After a certain time", "Based on a fixed amount of time"),
        AutoAdvanceOption::new(
            "media",
            "After media has played",
            "Based on the first media block encountered on the page",
        ),
    ]
}
