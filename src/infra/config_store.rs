// ============================================================
// Layer 6 — Config Store
// ============================================================
// Reads `QaConfig` from JSON. Fields missing from the
// file take their default value, so a config only needs to
// name what differs from the exported model's constants.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::config::QaConfig;

/// Load and validate a JSON config file.
pub fn load_config(path: &Path) -> Result<QaConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

    let cfg: QaConfig = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config JSON in '{}'", path.display()))?;
    cfg.validate()?;

    tracing::debug!("Loaded config from '{}'", path.display());
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa_config.json");
        fs::write(&path, r#"{"max_seq_len": 384, "top_k": 3}"#).unwrap();
        let cfg = QaConfig { max_seq_len: 384, top_k: 3, ..QaConfig::default() };
        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"top_k": 0}"#).unwrap();
        assert!(load_config(&path).is_err());
    }
}
