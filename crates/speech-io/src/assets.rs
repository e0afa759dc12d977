//! Pre-rendered audio assets for canned responses
//!
//! The question, greeting and completion lines are rendered to audio once,
//! up front; at runtime the dialogue core only emits an [`AssetKey`] and
//! this catalog resolves it to a file reference.

use dialogue_engine::{AssetKey, BookingField};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AssetCatalog {
    dir: PathBuf,
    files: HashMap<AssetKey, String>,
}

impl AssetCatalog {
    /// Catalog with the standard `<key>.wav` naming under `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut files = HashMap::new();
        files.insert(AssetKey::Greeting, "greeting.wav".to_string());
        files.insert(AssetKey::Completion, "completion.wav".to_string());
        files.insert(AssetKey::DidntCatch, "didnt_catch.wav".to_string());
        for field in BookingField::ALL {
            files.insert(AssetKey::Field(field), format!("{field}.wav"));
        }
        Self {
            dir: dir.into(),
            files,
        }
    }

    pub fn file_name(&self, key: AssetKey) -> Option<&str> {
        self.files.get(&key).map(String::as_str)
    }

    pub fn path(&self, key: AssetKey) -> Option<PathBuf> {
        self.file_name(key).map(|name| self.dir.join(name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new("audio_files")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_to_a_wav() {
        let catalog = AssetCatalog::default();
        assert_eq!(catalog.file_name(AssetKey::Greeting), Some("greeting.wav"));
        assert_eq!(
            catalog.file_name(AssetKey::Field(BookingField::CarReg)),
            Some("car_reg.wav")
        );
        for field in BookingField::ALL {
            assert!(catalog.path(AssetKey::Field(field)).is_some());
        }
    }
}
