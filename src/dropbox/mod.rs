pub mod errors;
pub mod types;

use crate::requests;
use chrono::{DateTime, Utc};
use errors::DropboxError;
use oauth2::{
    basic::{BasicClient, BasicErrorResponse, BasicErrorResponseType, BasicTokenResponse},
    url::Url,
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RefreshToken,
    RequestTokenError, TokenResponse, TokenUrl,
};
use types::Grant;

pub const AUTHORIZE_URL: &str = "https://www.dropbox.com/oauth2/authorize";
pub const TOKEN_URL: &str = "https://api.dropboxapi.com/oauth2/token";

/// The OAuth operations the refresh flow needs from Dropbox.
pub trait TokenEndpoint {
    /// URL the operator opens to approve the app and get a code.
    fn authorization_url(&self) -> Url;

    fn exchange_code(&self, code: &str) -> Result<Grant, DropboxError>;

    fn refresh(&self, refresh_token: &str) -> Result<Grant, DropboxError>;
}

pub struct Client {
    oauth: BasicClient,
}

impl Client {
    pub fn new(app_key: &str, app_secret: &str) -> Result<Self, DropboxError> {
        Self::with_endpoints(app_key, app_secret, AUTHORIZE_URL, TOKEN_URL)
    }

    pub fn with_endpoints(
        app_key: &str,
        app_secret: &str,
        authorize_url: &str,
        token_url: &str,
    ) -> Result<Self, DropboxError> {
        let secret = if app_secret.is_empty() {
            None
        } else {
            Some(ClientSecret::new(app_secret.to_string()))
        };

        // Dropbox expects the app key and secret in the form body
        let oauth = BasicClient::new(
            ClientId::new(app_key.to_string()),
            secret,
            AuthUrl::new(authorize_url.to_string())?,
            Some(TokenUrl::new(token_url.to_string())?),
        )
        .set_auth_type(AuthType::RequestBody);

        Ok(Self { oauth })
    }
}

impl TokenEndpoint for Client {
    fn authorization_url(&self) -> Url {
        let (url, _state) = self
            .oauth
            .authorize_url(CsrfToken::new_random)
            .add_extra_param("token_access_type", "offline")
            .url();

        url
    }

    fn exchange_code(&self, code: &str) -> Result<Grant, DropboxError> {
        let response = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request(requests::send)
            .map_err(|e| DropboxError::Authorization(describe(e)))?;

        Ok(grant_from(&response, Utc::now()))
    }

    fn refresh(&self, refresh_token: &str) -> Result<Grant, DropboxError> {
        let response = self
            .oauth
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request(requests::send)
            .map_err(|e| match e {
                RequestTokenError::ServerResponse(ref resp)
                    if *resp.error() == BasicErrorResponseType::InvalidGrant =>
                {
                    DropboxError::InvalidRefreshToken(resp.to_string())
                }
                e => DropboxError::TokenRequest(describe(e)),
            })?;

        Ok(grant_from(&response, Utc::now()))
    }
}

fn grant_from(response: &BasicTokenResponse, now: DateTime<Utc>) -> Grant {
    let expires_at = response
        .expires_in()
        .and_then(|d| chrono::Duration::from_std(d).ok())
        .and_then(|d| now.checked_add_signed(d));

    Grant {
        access_token: response.access_token().secret().to_string(),
        refresh_token: response.refresh_token().map(|t| t.secret().to_string()),
        expires_at,
    }
}

fn describe<RE>(err: RequestTokenError<RE, BasicErrorResponse>) -> String
where
    RE: std::error::Error + 'static,
{
    match err {
        RequestTokenError::ServerResponse(resp) => resp.to_string(),
        RequestTokenError::Request(e) => format!("request failed: {}", e),
        RequestTokenError::Parse(e, _) => format!("unexpected answer: {}", e),
        RequestTokenError::Other(msg) => msg,
    }
}
