use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Four edges, three guessable ranges.
pub const DEFAULT_BANDS: usize = 4;

#[derive(Serialize, Deserialize)]
struct Config {
    bands: usize,
}

pub fn config_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".earq").join("config.json")
}

pub fn load_bands() -> usize {
    load_bands_from(&config_path())
}

pub fn load_bands_from(path: &Path) -> usize {
    if let Ok(contents) = fs::read_to_string(path) {
        if let Ok(config) = serde_json::from_str::<Config>(&contents) {
            if config.bands >= 2 {
                return config.bands;
            }
        }
    }
    DEFAULT_BANDS
}

pub fn save_bands(bands: usize) {
    save_bands_to(&config_path(), bands);
}

pub fn save_bands_to(path: &Path, bands: usize) {
    let config = Config { bands };
    if let Ok(serialized) = serde_json::to_string_pretty(&config) {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(path, serialized) {
            eprintln!("Failed to save config: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let path = env::temp_dir().join("earq-config-test").join("config.json");
        save_bands_to(&path, 6);
        assert_eq!(load_bands_from(&path), 6);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let path = env::temp_dir().join("earq-config-test-missing.json");
        let _ = fs::remove_file(&path);
        assert_eq!(load_bands_from(&path), DEFAULT_BANDS);
    }

    #[test]
    fn test_corrupt_or_invalid_values_fall_back_to_default() {
        let path = env::temp_dir().join("earq-config-test-corrupt.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(load_bands_from(&path), DEFAULT_BANDS);

        fs::write(&path, "{\"bands\": 1}").unwrap();
        assert_eq!(load_bands_from(&path), DEFAULT_BANDS);
        let _ = fs::remove_file(&path);
    }
}
