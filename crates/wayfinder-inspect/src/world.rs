//! World snapshot loading.

use std::path::Path;

use wayfinder_graph::WorldSnapshot;

/// Errors from reading a world snapshot.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The file could not be read.
    #[error("failed to read world file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid JSON snapshot.
    #[error("failed to parse world JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file is not a valid YAML snapshot.
    #[error("failed to parse world YAML: {0}")]
    Yaml(#[from] serde_yml::Error),
}

/// Load a snapshot from `path`.
///
/// Files ending in `.json` are read as JSON, everything else as YAML.
pub fn load_world(path: &Path) -> Result<WorldSnapshot, WorldError> {
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&contents)
    } else {
        parse_yaml(&contents)
    }
}

/// Parse a snapshot from JSON text.
pub fn parse_json(contents: &str) -> Result<WorldSnapshot, WorldError> {
    Ok(serde_json::from_str(contents)?)
}

/// Parse a snapshot from YAML text.
pub fn parse_yaml(contents: &str) -> Result<WorldSnapshot, WorldError> {
    Ok(serde_yml::from_str(contents)?)
}
