use crate::user;
use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

pub const APP_KEY_VAR: &str = "DROPBOX_PERSONAL_APP_KEY";
pub const APP_SECRET_VAR: &str = "DROPBOX_PERSONAL_APP_SECRET";
pub const REFRESH_TOKEN_VAR: &str = "DROPBOX_PERSONAL_REFRESH_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub app_key: String,
    pub app_secret: String,
    /// dbxcli's auth.json
    pub auth_file: PathBuf,
    pub session_file: PathBuf,
    /// Given on the command line or through the environment. Takes
    /// precedence over the one in the session file.
    pub refresh_token: Option<String>,
    pub open_browser: bool,
}

/// What the command line may override.
#[derive(Debug, Default)]
pub struct Overrides {
    pub auth_file: Option<PathBuf>,
    pub session_file: Option<PathBuf>,
    pub refresh_token: Option<String>,
    pub open_browser: bool,
}

impl Config {
    pub fn load(overrides: Overrides) -> Result<Self> {
        Self::from_vars(overrides, |name| env::var(name).ok())
    }

    pub fn from_vars<F>(overrides: Overrides, var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_key = var(APP_KEY_VAR).unwrap_or_default();
        if app_key.trim().is_empty() {
            bail!("`{}` is not set. It should hold the Dropbox app key.", APP_KEY_VAR);
        }
        let app_secret = var(APP_SECRET_VAR).unwrap_or_default();

        let auth_file = match overrides.auth_file {
            Some(path) => path,
            None => user::dbxcli_auth_file()?,
        };
        let session_file = match overrides.session_file {
            Some(path) => path,
            None => user::session_file()?,
        };

        let refresh_token = overrides
            .refresh_token
            .or_else(|| var(REFRESH_TOKEN_VAR))
            .filter(|t| !t.trim().is_empty());

        Ok(Self {
            app_key: app_key.trim().to_string(),
            app_secret: app_secret.trim().to_string(),
            auth_file,
            session_file,
            refresh_token,
            open_browser: overrides.open_browser,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn paths() -> Overrides {
        Overrides {
            auth_file: Some(PathBuf::from("/tmp/auth.json")),
            session_file: Some(PathBuf::from("/tmp/session.toml")),
            ..Overrides::default()
        }
    }

    #[test]
    fn app_key_is_required() {
        let err = Config::from_vars(paths(), vars(&[(APP_SECRET_VAR, "secret")])).unwrap_err();

        assert!(err.to_string().contains(APP_KEY_VAR));
    }

    #[test]
    fn reads_app_credentials_from_the_environment() {
        let config = Config::from_vars(
            paths(),
            vars(&[(APP_KEY_VAR, "key"), (APP_SECRET_VAR, "secret")]),
        )
        .unwrap();

        assert_eq!(config.app_key, "key");
        assert_eq!(config.app_secret, "secret");
        assert_eq!(config.refresh_token, None);
        assert_eq!(config.auth_file, PathBuf::from("/tmp/auth.json"));
    }

    #[test]
    fn command_line_refresh_token_wins_over_environment() {
        let overrides = Overrides {
            refresh_token: Some("from-cli".to_string()),
            ..paths()
        };

        let config = Config::from_vars(
            overrides,
            vars(&[(APP_KEY_VAR, "key"), (REFRESH_TOKEN_VAR, "from-env")]),
        )
        .unwrap();

        assert_eq!(config.refresh_token.as_deref(), Some("from-cli"));
    }

    #[test]
    fn empty_refresh_token_counts_as_absent() {
        let config = Config::from_vars(
            paths(),
            vars(&[(APP_KEY_VAR, "key"), (REFRESH_TOKEN_VAR, "  ")]),
        )
        .unwrap();

        assert_eq!(config.refresh_token, None);
    }
}
