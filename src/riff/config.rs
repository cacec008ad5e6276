use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::riff::tag::Tag;
use crate::riff::{INFO_MAGIC, LIST_MAGIC, MAX_DEPTH, MOVI_MAGIC};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

/// Odd sized chunk handling
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Advance by exactly the declared size
    #[default]
    None,

    /// Skip the pad byte that follows an odd sized payload
    Even,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfig {
    /// Deepest LIST nesting level permitted
    pub max_depth: usize,

    pub padding: Padding,

    /// Chunk ids that open a nested group
    pub group_ids: Vec<Tag>,

    /// Bare 4 byte marker skipped over wherever it shows up
    pub info_marker: Option<Tag>,

    /// Group types skipped as one blob instead of being descended into
    pub opaque: Vec<Tag>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            max_depth: MAX_DEPTH,
            padding: Padding::None,
            group_ids: vec![LIST_MAGIC],
            info_marker: Some(INFO_MAGIC),
            opaque: vec![MOVI_MAGIC],
        }
    }
}

impl ReaderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        ReaderConfig::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn is_group(&self, id: &Tag) -> bool {
        self.group_ids.contains(id)
    }

    pub fn is_info(&self, id: &Tag) -> bool {
        self.info_marker.as_ref() == Some(id)
    }

    pub fn is_opaque(&self, typ: &Tag) -> bool {
        self.opaque.contains(typ)
    }
}
