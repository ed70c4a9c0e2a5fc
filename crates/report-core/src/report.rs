use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockOutcome {
    Exported,
    /// Nothing exportable inside; no directory and no placeholders.
    Empty,
    /// Directory already on disk before this run.
    Preexisting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockReport {
    pub name: String,
    pub directory: PathBuf,
    pub outcome: BlockOutcome,
    pub instances: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportReport {
    pub root: PathBuf,
    pub name: String,
    pub scale: f64,
    pub dry_run: bool,
    pub files: Vec<PathBuf>,
    pub blocks: Vec<BlockReport>,
    pub block_placeholders: usize,
    pub light_placeholders: usize,
    pub warnings: Vec<Warning>,
}

impl ExportReport {
    pub fn block(&self, name: &str) -> Option<&BlockReport> {
        self.blocks.iter().find(|b| b.name == name)
    }

    pub fn warn(&mut self, code: &str, message: impl Into<String>) {
        self.warnings.push(Warning {
            code: code.to_string(),
            message: message.into(),
        });
    }
}
