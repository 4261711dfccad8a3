use crate::{
    dropbox::{errors::DropboxError, types::Session, TokenEndpoint},
    files, log, readline,
};
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;

/// Walks the operator through the no-redirect flow and returns the refresh token
/// Dropbox hands out for the approved app.
pub fn authorize<E, R, W>(endpoint: &E, input: &mut R, output: &mut W, open_browser: bool) -> Result<String>
where
    E: TokenEndpoint + ?Sized,
    R: BufRead,
    W: Write,
{
    let url = endpoint.authorization_url();

    writeln!(output, "1. Go to: {}", url)?;
    writeln!(output, "2. Click \"Allow\" (you might have to log in first).")?;
    writeln!(output, "3. Copy the authorization code.")?;

    if open_browser {
        if let Err(e) = webbrowser::open(url.as_str()) {
            log::warn(format!("Unable to open the link in a browser: {}", e));
        }
    }

    let code = match readline::prompt_from(input, output, "Enter the authorization code here: ")? {
        Some(code) => code,
        None => {
            return Err(DropboxError::Authorization("no authorization code was entered".to_string()).into())
        }
    };

    let grant = endpoint.exchange_code(&code)?;

    match grant.refresh_token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(DropboxError::MissingRefreshToken.into()),
    }
}

/// Refresh token saved by an earlier authorization, if there is one.
pub fn load_refresh_token(session_file: &Path) -> Result<Option<String>> {
    if !session_file.exists() {
        return Ok(None);
    }

    let session = files::read_toml::<Session>(session_file)?;
    if session.refresh_token.is_empty() {
        return Ok(None);
    }

    Ok(Some(session.refresh_token))
}

pub fn store_refresh_token(session_file: &Path, refresh_token: &str) -> Result<()> {
    let session = Session {
        refresh_token: refresh_token.to_string(),
    };

    files::write_toml(&session, session_file)
}
