//! API token persistence.
//!
//! The token is stored as a single `META_ADS_API_TOKEN=<token>` line in a
//! `.env`-style file. Saving overwrites the file wholesale.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::TOKEN_ENV_VAR;
use crate::error_handling::CredentialError;

/// Reads and writes the token file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token. A missing file or key yields `None`.
    pub fn load(&self) -> Result<Option<String>, CredentialError> {
        if !self.path.exists() {
            debug!("No token file at {}", self.path.display());
            return Ok(None);
        }

        let parse_error = |source| CredentialError::Parse {
            path: self.path.display().to_string(),
            source,
        };
        for item in dotenvy::from_path_iter(&self.path).map_err(parse_error)? {
            let (key, value) = item.map_err(parse_error)?;
            if key == TOKEN_ENV_VAR {
                return Ok(non_empty(&value));
            }
        }
        Ok(None)
    }

    /// Writes `token`, replacing whatever the file held before.
    pub fn save(&self, token: &str) -> Result<(), CredentialError> {
        std::fs::write(&self.path, format!("{TOKEN_ENV_VAR}={}\n", token.trim())).map_err(
            |source| CredentialError::Io {
                path: self.path.display().to_string(),
                source,
            },
        )?;
        debug!("Saved API token to {}", self.path.display());
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Finds the token to use: explicit value, then the process environment,
/// then the token file.
pub fn resolve_token(
    explicit: Option<&str>,
    store: &TokenStore,
) -> Result<Option<String>, CredentialError> {
    let from_env = std::env::var(TOKEN_ENV_VAR).ok();
    pick_token(explicit, from_env.as_deref(), store)
}

fn pick_token(
    explicit: Option<&str>,
    from_env: Option<&str>,
    store: &TokenStore,
) -> Result<Option<String>, CredentialError> {
    if let Some(token) = explicit.and_then(non_empty) {
        return Ok(Some(token));
    }
    if let Some(token) = from_env.and_then(non_empty) {
        return Ok(Some(token));
    }
    store.load()
}

/// Masks all but the last four characters of a token for display.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> TokenStore {
        TokenStore::new(dir.path().join(".env"))
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("EAAB-token-1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("EAAB-token-1"));

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "META_ADS_API_TOKEN=EAAB-token-1\n");
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "OTHER=1\nMETA_ADS_API_TOKEN=old\n").unwrap();

        store.save("new").unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "META_ADS_API_TOKEN=new\n");
        assert_eq!(store.load().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_load_ignores_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "OTHER=1\n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_empty_stored_token_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "META_ADS_API_TOKEN=\n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_pick_token_precedence() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save("from-file").unwrap();

        assert_eq!(
            pick_token(Some("cli"), Some("env"), &store).unwrap().as_deref(),
            Some("cli")
        );
        assert_eq!(
            pick_token(None, Some("env"), &store).unwrap().as_deref(),
            Some("env")
        );
        assert_eq!(
            pick_token(Some("  "), Some(""), &store).unwrap().as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("EAABsecret1234"), "**********1234");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token(""), "");
    }
}
