/*
    The auth file of dbxcli. Tokens live under the default profile (the empty key):
    { "": { "personal": "<access token>", "expired": "<ISO-8601 expiry>" } }
    Everything else in the document is kept untouched when it's written back.
*/
use crate::files;
use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, TimeZone, Utc};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PROFILE: &str = "";
const ACCESS_TOKEN_KEY: &str = "personal";
const EXPIRY_KEY: &str = "expired";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Error, Debug)]
pub enum AuthFileError {
    #[error("No default profile (empty key) in the dbxcli auth file")]
    MissingProfile,
    #[error("Field `{0}` of the dbxcli auth file should be a string")]
    NotAString(&'static str),
    #[error("Unable to parse token expiry {0:?}")]
    BadExpiry(String),
}

/// Token expiry. Remembers whether the file wrote it with an offset, so
/// the refreshed value goes back in the same shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expiry {
    pub at: DateTime<Utc>,
    naive: bool,
}

impl Expiry {
    /// Accepts RFC 3339 and offset-less timestamps; the latter are UTC.
    pub fn parse(text: &str) -> Result<Self, AuthFileError> {
        let text = text.trim();

        if let Ok(at) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self {
                at: at.with_timezone(&Utc),
                naive: false,
            });
        }

        for format in NAIVE_FORMATS.iter() {
            if let Ok(at) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Self {
                    at: Utc.from_utc_datetime(&at),
                    naive: true,
                });
            }
        }

        Err(AuthFileError::BadExpiry(text.to_string()))
    }

    pub fn naive(at: DateTime<Utc>) -> Self {
        Self {
            at: at.trunc_subsecs(6),
            naive: true,
        }
    }

    /// Same style as `self`, different instant.
    pub fn with_time(&self, at: DateTime<Utc>) -> Self {
        Self {
            at: at.trunc_subsecs(6),
            naive: self.naive,
        }
    }

    pub fn to_iso(&self) -> String {
        if self.naive {
            self.at.naive_utc().format(NAIVE_FORMATS[0]).to_string()
        } else {
            self.at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub access_token: String,
    pub expiry: Option<Expiry>,
}

pub struct AuthFile {
    path: PathBuf,
    document: Value,
}

impl AuthFile {
    pub fn load(path: &Path) -> Result<Self> {
        let document = files::read_json::<Value>(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn credential(&self) -> Result<Credential, AuthFileError> {
        let profile = self.profile()?;

        let access_token = match profile.get(ACCESS_TOKEN_KEY) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(token)) => token.clone(),
            Some(_) => return Err(AuthFileError::NotAString(ACCESS_TOKEN_KEY)),
        };

        let expiry = match profile.get(EXPIRY_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) if text.trim().is_empty() => None,
            Some(Value::String(text)) => Some(Expiry::parse(text)?),
            Some(_) => return Err(AuthFileError::NotAString(EXPIRY_KEY)),
        };

        Ok(Credential {
            access_token,
            expiry,
        })
    }

    pub fn set_credential(&mut self, credential: &Credential) -> Result<(), AuthFileError> {
        let profile = self
            .document
            .get_mut(PROFILE)
            .and_then(Value::as_object_mut)
            .ok_or(AuthFileError::MissingProfile)?;

        profile.insert(
            ACCESS_TOKEN_KEY.to_string(),
            Value::String(credential.access_token.clone()),
        );
        profile.insert(
            EXPIRY_KEY.to_string(),
            credential
                .expiry
                .map(|e| Value::String(e.to_iso()))
                .unwrap_or(Value::Null),
        );

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        files::write_json(&self.document, &self.path)
    }

    fn profile(&self) -> Result<&Map<String, Value>, AuthFileError> {
        self.document
            .get(PROFILE)
            .and_then(Value::as_object)
            .ok_or(AuthFileError::MissingProfile)
    }
}
