use anyhow::{bail, Result};
use std::path::PathBuf;

pub fn get_home() -> Result<PathBuf> {
    if let Some(dir) = home::home_dir() {
        return Ok(dir);
    }

    bail!("Unable to locate user home directory");
}

/// Where dbxcli keeps its tokens.
pub fn dbxcli_auth_file() -> Result<PathBuf> {
    Ok(get_home()?.join(".config/dbxcli/auth.json"))
}

pub fn session_file() -> Result<PathBuf> {
    Ok(get_home()?.join(".config/dbx-token-refresh/session.toml"))
}
