use oauth2::{HttpRequest, HttpResponse};
use reqwest::{blocking::Client, redirect::Policy};
use std::time::Duration;

/// Same timeout the official Dropbox SDKs use for API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

/// Sends an OAuth token request. Works like `oauth2::reqwest::http_client`
/// (no redirects, so the client secret can't leak to another host) but
/// gives up after `REQUEST_TIMEOUT` instead of waiting on a stalled
/// connection forever.
pub fn send(request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let client = Client::builder()
        .redirect(Policy::none())
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let response = client
        .request(request.method, request.url.as_str())
        .headers(request.headers)
        .body(request.body)
        .send()?;

    let status_code = response.status();
    let headers = response.headers().clone();
    let body = response.bytes()?.to_vec();

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}
