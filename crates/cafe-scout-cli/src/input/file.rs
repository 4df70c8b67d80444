use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use cafe_scout_core::ScoringWeights;

/// Read a scoring weights file, YAML or JSON by extension, and validate it.
pub fn read_weights(path: &str) -> Result<ScoringWeights, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let weights: ScoringWeights = match extension(&canonical).as_deref() {
        Some("yaml") | Some("yml") => read_yaml(&canonical)?,
        Some("json") => read_json(&canonical)?,
        _ => {
            return Err(format!(
                "Unsupported weights file '{}': expected .yaml, .yml or .json",
                canonical.display()
            )
            .into())
        }
    };
    weights.validate()?;
    log::info!(
        "Loaded scoring weights '{}' from {}",
        weights.version,
        canonical.display()
    );
    Ok(weights)
}

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;
    Ok(value)
}

/// Read a YAML file and deserialise into a typed struct.
pub fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let value: T = serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;
    Ok(value)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Resolve the path against the working directory and check it names a file.
pub fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
