use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RawConfig;

/// Parse a JSON file into a RawConfig
pub fn parse_json_file(path: &Path) -> Result<RawConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;

    parse_json_str(&content)
}

/// Parse a JSON string into a RawConfig
pub fn parse_json_str(content: &str) -> Result<RawConfig> {
    let config: RawConfig =
        serde_json::from_str(content).context("Failed to parse JSON content")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Provider;

    #[test]
    fn test_parse_json_str_valid() {
        let config = parse_json_str(
            r#"{
                "infrastructure": {
                    "provider": "baremetal",
                    "nodes": { "cloud": 0, "edge": 3, "endpoint": 0 },
                    "cores": { "cloud": 0, "edge": 2, "endpoint": 0 },
                    "memory": { "cloud": 0, "edge": 2, "endpoint": 0 },
                    "quota": { "cloud": 0, "edge": 0.5, "endpoint": 0 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.infrastructure.provider, Provider::Baremetal);
    }

    #[test]
    fn test_parse_json_str_malformed() {
        assert!(parse_json_str("{ not json").is_err());
    }

    #[test]
    fn test_parse_json_file_missing() {
        assert!(parse_json_file(Path::new("/nonexistent/config.json")).is_err());
    }
}
