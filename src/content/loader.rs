//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;
use super::validation::ValidationError;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a RON file containing a DataFile<T> wrapper.
fn load_data_file<T>(path: &Path) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    let data: DataFile<T> = ron_options()
        .from_str(&contents)
        .map_err(|e| ContentLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })?;

    Ok(data.items)
}

/// Load all content from assets/data/*.ron into a ContentRegistry.
///
/// Load and validation problems are returned alongside whatever did load;
/// a broken file costs its contents, never the boot.
pub fn load_all_content(
    base_path: &Path,
) -> (ContentRegistry, Vec<ContentLoadError>, Vec<ValidationError>) {
    fn load<T>(base: &Path, file: &str, errors: &mut Vec<ContentLoadError>) -> Vec<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        match load_data_file(&base.join(file)) {
            Ok(items) => items,
            Err(e) => {
                errors.push(e);
                Vec::new()
            }
        }
    }

    let mut load_errors = Vec::new();
    let hitboxes: Vec<HitboxConfigDef> = load(base_path, "hitboxes.ron", &mut load_errors);
    let sets: Vec<ActionSetDef> = load(base_path, "actions.ron", &mut load_errors);
    let rags: Vec<RagDef> = load(base_path, "rags.ron", &mut load_errors);

    let (registry, validation_errors) = ContentRegistry::from_defs(sets, hitboxes, rags);
    (registry, load_errors, validation_errors)
}
