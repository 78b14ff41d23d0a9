//! On-disk stage for permanent function definitions.
//!
//! A stage is a directory holding one `<name>.json` file per definition.
//! Stages are addressed by location strings: `@~` is the caller's own stage,
//! `@<name>` a named one. Both resolve to directories under a stage root.

use std::fs;
use std::path::{Path, PathBuf};

use custrisk_core::FunctionDefinition;
use tracing::{debug, info};

use crate::StoreError;

/// Location used when a registration does not name one.
pub const DEFAULT_STAGE: &str = "@~";

const USER_STAGE_DIR: &str = "user";

/// A directory of persisted function definitions.
#[derive(Debug, Clone)]
pub struct Stage {
    location: String,
    dir: PathBuf,
}

impl Stage {
    /// Resolve a stage location against `root` and create its directory.
    pub fn resolve(location: &str, root: &Path) -> Result<Self, StoreError> {
        let dir_name = parse_location(location)?;
        let dir = root.join(dir_name);
        fs::create_dir_all(&dir)?;
        debug!(location, dir = %dir.display(), "stage resolved");
        Ok(Self {
            location: location.to_string(),
            dir,
        })
    }

    /// Location string this stage was resolved from, e.g. `@~`.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a definition, overwriting any previous one with the same name.
    pub fn put(&self, def: &FunctionDefinition) -> Result<(), StoreError> {
        let path = self.path_for(&normalize_name(&def.name)?);
        fs::write(&path, def.to_json()?)?;
        info!(name = %def.name, stage = %self.location, "definition staged");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<FunctionDefinition, StoreError> {
        let name = normalize_name(name)?;
        let path = self.path_for(&name);
        if !path.exists() {
            return Err(StoreError::NotFound(name));
        }
        let text = fs::read_to_string(&path)?;
        Ok(FunctionDefinition::from_json(&text)?)
    }

    pub fn contains(&self, name: &str) -> bool {
        normalize_name(name).is_ok_and(|name| self.path_for(&name).exists())
    }

    /// All staged definitions, sorted by name.
    pub fn list(&self) -> Result<Vec<FunctionDefinition>, StoreError> {
        let mut defs = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let text = fs::read_to_string(&path)?;
                defs.push(FunctionDefinition::from_json(&text)?);
            }
        }
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(defs)
    }

    /// Delete a staged definition.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        let name = normalize_name(name)?;
        let path = self.path_for(&name);
        if !path.exists() {
            return Err(StoreError::NotFound(name));
        }
        fs::remove_file(&path)?;
        info!(%name, stage = %self.location, "definition removed");
        Ok(())
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

/// Check that `name` is a plain SQL identifier and lower-case it.
///
/// Identifiers start with an ASCII letter or `_` and continue with ASCII
/// alphanumerics or `_`.
pub fn normalize_name(name: &str) -> Result<String, StoreError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(name.to_ascii_lowercase())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// Map a location string to the directory name under the stage root.
fn parse_location(location: &str) -> Result<&str, StoreError> {
    let invalid = || StoreError::InvalidStage(location.to_string());
    let name = location.strip_prefix('@').ok_or_else(invalid)?;
    if name == "~" {
        return Ok(USER_STAGE_DIR);
    }
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid { Ok(name) } else { Err(invalid()) }
}
