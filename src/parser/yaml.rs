use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RawConfig;

/// Parse a YAML file into a RawConfig
pub fn parse_yaml_file(path: &Path) -> Result<RawConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read YAML file: {}", path.display()))?;

    parse_yaml_str(&content)
}

/// Parse a YAML string into a RawConfig
pub fn parse_yaml_str(content: &str) -> Result<RawConfig> {
    let config: RawConfig =
        serde_yaml::from_str(content).context("Failed to parse YAML content")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_str_valid() {
        let config = parse_yaml_str(
            r#"
infrastructure:
  provider: qemu
  nodes: { cloud: 2, edge: 0, endpoint: 1 }
  cores: { cloud: 2, edge: 0, endpoint: 1 }
  memory: { cloud: 4, edge: 0, endpoint: 2 }
  quota: { cloud: 0.5, edge: 0, endpoint: 0.4 }
  networkEmulation: true
"#,
        )
        .unwrap();
        assert_eq!(config.infrastructure.network_emulation, Some(true));
        assert_eq!(config.infrastructure.nodes.endpoint, 1.0);
    }

    #[test]
    fn test_parse_yaml_str_malformed() {
        assert!(parse_yaml_str("infrastructure: [not: a map").is_err());
    }
}
