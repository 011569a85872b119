//! Snap lines currently displayed on the canvas

use log::debug;
use serde::{Deserialize, Serialize};

use super::line::SnapLine;

/// Guide lines shown while dragging, and whether they are visible
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapLinesState {
    lines: Vec<SnapLine>,
    visible: bool,
}

impl SnapLinesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the displayed lines, dropping duplicates
    pub fn set_lines(&mut self, lines: &[SnapLine]) {
        self.lines.clear();
        for line in lines {
            if !self.lines.contains(line) {
                self.lines.push(*line);
            }
        }
        debug!("[SNAP] Showing {} snap lines", self.lines.len());
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn lines(&self) -> &[SnapLine] {
        &self.lines
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
