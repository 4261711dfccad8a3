use crate::{
    auth,
    config::{Config, REFRESH_TOKEN_VAR},
    dbxcli::{AuthFile, Credential, Expiry},
    dropbox::{errors::DropboxError, TokenEndpoint},
    log,
};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use std::io::{BufRead, Write};

/// Tokens this close to their expiry get refreshed already.
const EXPIRATION_BUFFER_SECS: i64 = 300;

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The stored token is still good, the auth file was not touched.
    Unchanged,
    Refreshed { expiry: Option<DateTime<Utc>> },
}

pub fn needs_refresh(credential: &Credential, now: DateTime<Utc>) -> bool {
    if credential.access_token.is_empty() {
        return true;
    }

    match credential.expiry {
        Some(expiry) => now + Duration::seconds(EXPIRATION_BUFFER_SECS) >= expiry.at,
        None => true,
    }
}

/// Returns the credential as is when it's still valid at `now`, otherwise
/// trades the refresh token for a new access token.
pub fn check_and_refresh<E>(
    endpoint: &E,
    credential: &Credential,
    refresh_token: &str,
    now: DateTime<Utc>,
) -> Result<Credential, DropboxError>
where
    E: TokenEndpoint + ?Sized,
{
    if !needs_refresh(credential, now) {
        return Ok(credential.clone());
    }

    let grant = endpoint.refresh(refresh_token)?;
    let expiry = grant.expires_at.map(|at| match credential.expiry {
        Some(previous) => previous.with_time(at),
        None => Expiry::naive(at),
    });

    Ok(Credential {
        access_token: grant.access_token,
        expiry,
    })
}

/// Runs the interactive authorization and saves the refresh token for the next runs.
pub fn authorize_and_store<E, R, W>(config: &Config, endpoint: &E, input: &mut R, output: &mut W) -> Result<String>
where
    E: TokenEndpoint + ?Sized,
    R: BufRead,
    W: Write,
{
    let refresh_token = auth::authorize(endpoint, input, output, config.open_browser)?;

    auth::store_refresh_token(&config.session_file, &refresh_token)?;
    log::info(format!(
        "App is authorized. Refresh token saved to {:?}",
        config.session_file
    ));

    Ok(refresh_token)
}

/// Makes sure dbxcli's auth file holds a usable access token.
pub fn run<E, R, W>(
    config: &Config,
    endpoint: &E,
    input: &mut R,
    output: &mut W,
    now: DateTime<Utc>,
) -> Result<Outcome>
where
    E: TokenEndpoint + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut auth_file = AuthFile::load(&config.auth_file)?;
    let original = auth_file.credential()?;

    let refresh_token = match stored_refresh_token(config)? {
        Some(token) => token,
        None => {
            log::warn("No refresh token found, the app has to be authorized first.".to_string());
            authorize_and_store(config, endpoint, input, output)?
        }
    };

    let updated = match check_and_refresh(endpoint, &original, &refresh_token, now) {
        Err(DropboxError::InvalidRefreshToken(details)) => {
            log::warn(format!(
                "Refresh token was rejected ({}). The app has to be authorized again.",
                details
            ));
            let refresh_token = authorize_and_store(config, endpoint, input, output)?;
            if let Some(tip) = override_tip(config) {
                log::warn(tip);
            }
            check_and_refresh(endpoint, &original, &refresh_token, now)?
        }
        result => result?,
    };

    if updated.access_token == original.access_token {
        log::info("Access token is still valid.".to_string());
        return Ok(Outcome::Unchanged);
    }

    auth_file.set_credential(&updated)?;
    auth_file.save()?;

    let expiry = updated.expiry.map(|e| e.at);
    match expiry {
        Some(at) => log::info(format!(
            "Access token refreshed, valid until {}. Saved to {:?}",
            at,
            auth_file.path()
        )),
        None => log::info(format!(
            "Access token refreshed. Saved to {:?}",
            auth_file.path()
        )),
    }

    Ok(Outcome::Refreshed { expiry })
}

/// An explicitly given refresh token shadows the saved one, so a revoked
/// token would send every run through authorization again.
fn override_tip(config: &Config) -> Option<String> {
    config.refresh_token.as_ref().map(|_| {
        format!(
            "Tip: the new refresh token is in {:?}. Unset `{}` and drop `--refresh-token` so the next runs pick it up.",
            config.session_file, REFRESH_TOKEN_VAR
        )
    })
}

fn stored_refresh_token(config: &Config) -> Result<Option<String>> {
    if let Some(token) = &config.refresh_token {
        return Ok(Some(token.clone()));
    }

    auth::load_refresh_token(&config.session_file)
}
