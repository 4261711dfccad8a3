use thiserror::Error;

#[derive(Error, Debug)]
pub enum DropboxError {
    #[error("Unable to exchange the authorization code: {0}")]
    Authorization(String),
    #[error("Dropbox rejected the refresh token: {0}")]
    InvalidRefreshToken(String),
    #[error("Request to the token endpoint failed: {0}")]
    TokenRequest(String),
    #[error("Dropbox did not hand out a refresh token (is the app asking for offline access?)")]
    MissingRefreshToken,
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] oauth2::url::ParseError),
}
