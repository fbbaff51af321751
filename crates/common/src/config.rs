//! Loading of the per-service TOML configuration files.
//!
//! On Unix the file must be a regular file that is not world-writable, and a
//! file holding an API key must not be world-readable.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{CepnetError, Result};

/// Read and parse a TOML configuration file.
pub fn load_toml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();

    #[cfg(unix)]
    let permission_bits = validate_config_file_permissions(path)?;

    let content = std::fs::read_to_string(path)?;
    if contains_api_key(&content) {
        #[cfg(unix)]
        if permission_bits & 0o004 != 0 {
            return Err(CepnetError::Config(format!(
                "Config file '{}' contains an API key but is world-readable (mode {:04o}). Fix with: chmod 600 {}",
                path.display(),
                permission_bits,
                path.display()
            )));
        }

        warn!(
            "API key found in config file '{}'. Prefer the OPENAI_API_KEY environment variable.",
            path.display()
        );
    }

    toml::from_str(&content)
        .map_err(|e| CepnetError::Config(format!("{}: {e}", path.display())))
}

fn contains_api_key(content: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim_start();
        line.starts_with("api_key") && line.contains('=')
    })
}

/// Check the file type and write bits; returns the permission bits.
#[cfg(unix)]
fn validate_config_file_permissions(path: &Path) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::symlink_metadata(path).map_err(|e| {
        CepnetError::Config(format!("Failed to read config file '{}': {e}", path.display()))
    })?;

    if !metadata.is_file() {
        return Err(CepnetError::Config(format!(
            "Config path '{}' is not a regular file",
            path.display()
        )));
    }

    let permission_bits = metadata.permissions().mode() & 0o777;

    if permission_bits & 0o002 != 0 {
        return Err(CepnetError::Config(format!(
            "Config file '{}' is world-writable (mode {:04o}). Fix with: chmod o-w {}",
            path.display(),
            permission_bits,
            path.display()
        )));
    }

    Ok(permission_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct Sample {
        port: u16,
        #[serde(default)]
        name: Option<String>,
    }

    fn write_config(content: &str, mode: u32) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(mode)).unwrap();
        }
        #[cfg(not(unix))]
        let _ = mode;
        file
    }

    #[test]
    fn loads_valid_file() {
        let file = write_config("port = 8002\nname = \"consult\"\n", 0o644);
        let sample: Sample = load_toml(file.path()).unwrap();
        assert_eq!(sample.port, 8002);
        assert_eq!(sample.name.as_deref(), Some("consult"));
    }

    #[test]
    fn parse_error_is_config_error() {
        let file = write_config("port = \"not a number\"\n", 0o644);
        let err = load_toml::<Sample>(file.path()).unwrap_err();
        assert!(matches!(err, CepnetError::Config(_)));
    }

    #[test]
    fn missing_file_fails() {
        assert!(load_toml::<Sample>("/nonexistent/cepnet.toml").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn rejects_world_writable_file() {
        let file = write_config("port = 1\n", 0o666);
        let err = load_toml::<Sample>(file.path()).unwrap_err();
        assert!(err.to_string().contains("world-writable"));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_world_readable_api_key() {
        let file = write_config("port = 1\napi_key = \"sk-test\"\n", 0o644);
        let err = load_toml::<Sample>(file.path()).unwrap_err();
        assert!(err.to_string().contains("world-readable"));

        let file = write_config("port = 1\napi_key = \"sk-test\"\n", 0o600);
        assert!(load_toml::<Sample>(file.path()).is_ok());
    }
}
