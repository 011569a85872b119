//! Story Settings
//!
//! Document-wide defaults applied to new pages: when to advance to the next
//! page, and for the "time" option, after how many seconds. Both values live
//! in the document meta owned by the host.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::AutoAdvanceOption;
use crate::error::{Result, StoryError};
use crate::host::{Attributes, HostEditor};

/// Meta key holding the auto-advance option value
pub const AUTO_ADVANCE_AFTER_KEY: &str = "amp_story_auto_advance_after";

/// Meta key holding the auto-advance duration in seconds
pub const AUTO_ADVANCE_AFTER_DURATION_KEY: &str = "amp_story_auto_advance_after_duration";

/// Option value that makes the duration apply
pub const TIME_OPTION: &str = "time";

/// Longest accepted auto-advance duration, in seconds
pub const MAX_AUTO_ADVANCE_DURATION: i64 = 100;

/// Story settings read from the document meta
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySettings {
    /// Selected auto-advance option value, if any
    pub auto_advance_after: Option<String>,
    /// Duration in seconds, 0 when unset
    pub auto_advance_after_duration: i64,
}

/// Partial update of the story settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub auto_advance_after: Option<String>,
    pub auto_advance_after_duration: Option<i64>,
}

impl StorySettings {
    /// Read the settings out of the document meta
    pub fn from_meta(meta: &Attributes) -> Self {
        let auto_advance_after = meta
            .get(AUTO_ADVANCE_AFTER_KEY)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        // Older documents stored the duration as a string; fractions are truncated
        let auto_advance_after_duration = match meta.get(AUTO_ADVANCE_AFTER_DURATION_KEY) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
                .unwrap_or(0),
            _ => 0,
        };

        Self {
            auto_advance_after,
            auto_advance_after_duration,
        }
    }

    /// Read the settings from the host's document meta
    pub fn load<H: HostEditor + ?Sized>(host: &H) -> Self {
        Self::from_meta(&host.document_meta())
    }

    /// The configured option matching the current value
    pub fn current_option<'a>(
        &self,
        options: &'a [AutoAdvanceOption],
    ) -> Option<&'a AutoAdvanceOption> {
        let value = self.auto_advance_after.as_deref()?;
        options.iter().find(|option| option.value == value)
    }

    /// Whether the duration setting is in effect
    pub fn uses_duration(&self) -> bool {
        self.auto_advance_after.as_deref() == Some(TIME_OPTION)
    }

    /// Apply `patch` on top of the existing document meta and write it back.
    ///
    /// Keys not named in the patch are kept as they are.
    ///
    /// # Errors
    /// Returns an error for a duration outside `0..=100` or when the host
    /// rejects the write.
    pub fn update_meta<H: HostEditor + ?Sized>(host: &mut H, patch: &SettingsPatch) -> Result<Self> {
        if let Some(duration) = patch.auto_advance_after_duration {
            if !(0..=MAX_AUTO_ADVANCE_DURATION).contains(&duration) {
                return Err(StoryError::InvalidDuration { value: duration });
            }
        }

        let mut meta = host.document_meta();
        if let Some(value) = &patch.auto_advance_after {
            meta.insert(AUTO_ADVANCE_AFTER_KEY.to_string(), json!(value));
        }
        if let Some(duration) = patch.auto_advance_after_duration {
            meta.insert(AUTO_ADVANCE_AFTER_DURATION_KEY.to_string(), json!(duration));
        }

        let settings = Self::from_meta(&meta);
        host.edit_document_meta(meta)?;
        Ok(settings)
    }
}
