//! Backend URL discovery from a `KEY=VALUE` env file

use reqwest::Url;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors resolving the backend base URL. All of them abort the run.
#[derive(Error, Debug)]
pub enum EnvFileError {
    #[error("Failed to read env file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{key} not found in {}", .path.display())]
    MissingKey { key: String, path: PathBuf },

    #[error("{key} is empty in {}", .path.display())]
    EmptyValue { key: String, path: PathBuf },

    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Read `key` from the env file at `path` and return `<value><suffix>`.
///
/// The value is trimmed, unquoted and stripped of trailing slashes before
/// the suffix is appended.
pub fn resolve_base_url(path: &Path, key: &str, suffix: &str) -> Result<String, EnvFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| EnvFileError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let value = parse_env_value(&content, key).ok_or_else(|| EnvFileError::MissingKey {
        key: key.to_string(),
        path: path.to_path_buf(),
    })?;

    if value.is_empty() {
        return Err(EnvFileError::EmptyValue {
            key: key.to_string(),
            path: path.to_path_buf(),
        });
    }

    let base = normalize_base_url(&value)?;
    debug!("Resolved {} from {} to {}", key, path.display(), base);

    Ok(format!("{base}{suffix}"))
}

/// Value of the first `key=...` line, trimmed and unquoted.
///
/// Blank lines and `#` comments are skipped. Only the first `=` splits the
/// line, so values may themselves contain `=`.
pub fn parse_env_value(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (name, value) = line.split_once('=')?;
        if name.trim() != key {
            return None;
        }
        Some(unquote(value.trim()).trim().to_string())
    })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Check that `raw` is an absolute HTTP(S) URL and drop trailing slashes
pub fn normalize_base_url(raw: &str) -> Result<String, EnvFileError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: &str| EnvFileError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const KEY: &str = "EXPO_PUBLIC_BACKEND_URL";

    #[test]
    fn test_parse_quoted_value() {
        let content = "EXPO_TUNNEL_SUBDOMAIN=oath\nEXPO_PUBLIC_BACKEND_URL=\"https://oath.example.com\"\n";
        assert_eq!(
            parse_env_value(content, KEY),
            Some("https://oath.example.com".to_string())
        );
    }

    #[test]
    fn test_parse_whitespace_and_single_quotes() {
        let content = "  EXPO_PUBLIC_BACKEND_URL = ' http://10.0.0.5:8001 '  \n";
        assert_eq!(
            parse_env_value(content, KEY),
            Some("http://10.0.0.5:8001".to_string())
        );
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let content = "EXPO_PUBLIC_BACKEND_URL=http://host/?token=abc\n";
        assert_eq!(
            parse_env_value(content, KEY),
            Some("http://host/?token=abc".to_string())
        );
    }

    #[test]
    fn test_parse_skips_comments_and_prefixed_keys() {
        let content = "# EXPO_PUBLIC_BACKEND_URL=http://old\nEXPO_PUBLIC_BACKEND_URL_OLD=http://older\nEXPO_PUBLIC_BACKEND_URL=http://current\n";
        assert_eq!(
            parse_env_value(content, KEY),
            Some("http://current".to_string())
        );
    }

    #[test]
    fn test_parse_missing_key() {
        assert_eq!(parse_env_value("OTHER=1\n", KEY), None);
        assert_eq!(parse_env_value("", KEY), None);
    }

    #[test]
    fn test_resolve_appends_suffix() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "EXPO_PUBLIC_BACKEND_URL=\"https://oath.example.com/\"\n").unwrap();

        let url = resolve_base_url(&path, KEY, "/api").unwrap();
        assert_eq!(url, "https://oath.example.com/api");
    }

    #[test]
    fn test_resolve_missing_file() {
        let dir = tempdir().unwrap();
        let err = resolve_base_url(&dir.path().join("absent.env"), KEY, "/api").unwrap_err();
        assert!(matches!(err, EnvFileError::Unreadable { .. }));
    }

    #[test]
    fn test_resolve_missing_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "EXPO_PACKAGER_HOSTNAME=localhost\n").unwrap();

        let err = resolve_base_url(&path, KEY, "/api").unwrap_err();
        assert!(matches!(err, EnvFileError::MissingKey { .. }));
        assert!(err.to_string().contains(KEY));
    }

    #[test]
    fn test_resolve_empty_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "EXPO_PUBLIC_BACKEND_URL=\"\"\n").unwrap();

        let err = resolve_base_url(&path, KEY, "/api").unwrap_err();
        assert!(matches!(err, EnvFileError::EmptyValue { .. }));
    }

    #[test]
    fn test_normalize_rejects_non_http() {
        assert!(normalize_base_url("ftp://example.com").is_err());
        assert!(normalize_base_url("not a url").is_err());
        assert_eq!(
            normalize_base_url("http://localhost:8001//").unwrap(),
            "http://localhost:8001"
        );
    }
}
