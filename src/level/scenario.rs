//! Scenario Files
//!
//! A scenario is an ordered list of full-screen stages: text pages, image
//! pages and labyrinths. Each is a tagged value carrying its asset file;
//! how a page is rendered (and dismissed) is the collaborator's business.
//!
//! Format: one stage per line, `T|I|L <file>` or the spelled-out kind,
//! `#` comments and blank lines skipped. Asset files live in a per-kind
//! folder next to the scenario root.

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use super::FormatError;

/// One full-screen stage of a scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// A text page, shown until dismissed.
    Text(String),
    /// An image page, shown until dismissed.
    Image(String),
    /// A playable labyrinth.
    Labyrinth(String),
}

impl Stage {
    /// Folder the stage's asset kind lives in.
    pub fn folder(&self) -> &'static str {
        match self {
            Stage::Text(_) => "texts",
            Stage::Image(_) => "images",
            Stage::Labyrinth(_) => "labs",
        }
    }

    /// The bare asset file name.
    pub fn file(&self) -> &str {
        match self {
            Stage::Text(file) | Stage::Image(file) | Stage::Labyrinth(file) => file,
        }
    }

    /// Full asset path under a scenario root directory.
    pub fn path(&self, root: &Path) -> PathBuf {
        root.join(self.folder()).join(self.file())
    }
}

/// Parse scenario text into its stage list.
pub fn parse_scenario(text: &str) -> Result<Vec<Stage>, FormatError> {
    let mut stages = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (kind, file) = match line.split_once(char::is_whitespace) {
            Some((kind, file)) if !file.trim().is_empty() => (kind, file.trim().to_string()),
            _ => return Err(FormatError::MissingStageFile { line: line_no }),
        };
        let stage = match kind.to_ascii_lowercase().as_str() {
            "t" | "text" => Stage::Text(file),
            "i" | "image" => Stage::Image(file),
            "l" | "labyrinth" => Stage::Labyrinth(file),
            _ => {
                return Err(FormatError::UnknownStageKind {
                    line: line_no,
                    kind: kind.to_string(),
                })
            }
        };
        stages.push(stage);
    }
    Ok(stages)
}

/// Read and parse a scenario file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Vec<Stage>, FormatError> {
    parse_scenario(&std::fs::read_to_string(path)?)
}
