use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the token endpoint hands out after a successful exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Grant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Persisted between runs so the operator authorizes the app only once.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub refresh_token: String,
}
