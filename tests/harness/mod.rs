//! Local stand-in for the Dropbox token endpoint.

use dbx_token_refresh::{config::Config, dropbox::Client};
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;
use tiny_http::{Header, Response, Server};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

pub const APP_KEY: &str = "app-key";
pub const APP_SECRET: &str = "app-secret";

/// Answers token requests with the queued responses, in order, and
/// reports every request body it sees. Redirect statuses point back at
/// the same server.
pub struct MockTokenServer {
    base_url: String,
    bodies: Receiver<String>,
    handle: Option<JoinHandle<()>>,
}

impl MockTokenServer {
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let (tx, bodies) = channel();

        let handle = thread::spawn(move || {
            let elsewhere = format!("http://127.0.0.1:{}/oauth2/elsewhere", port);

            for (status, body) in responses {
                let mut request = match server.recv_timeout(RECV_TIMEOUT) {
                    Ok(Some(request)) => request,
                    _ => return,
                };

                let mut received = String::new();
                request.as_reader().read_to_string(&mut received).unwrap();
                tx.send(received).unwrap();

                let mut response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                    );
                if (300..400).contains(&status) {
                    response.add_header(
                        Header::from_bytes(&b"Location"[..], elsewhere.as_bytes()).unwrap(),
                    );
                }
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            bodies,
            handle: Some(handle),
        }
    }

    pub fn client(&self) -> Client {
        Client::with_endpoints(
            APP_KEY,
            APP_SECRET,
            &format!("{}/oauth2/authorize", self.base_url),
            &format!("{}/oauth2/token", self.base_url),
        )
        .unwrap()
    }

    /// Waits for the server to answer everything queued and returns the request bodies.
    pub fn finish(mut self) -> Vec<String> {
        if let Some(handle) = self.handle.take() {
            handle.join().unwrap();
        }
        self.bodies.try_iter().collect()
    }
}

/// A dbxcli auth file and a session file in a scratch directory.
pub struct Workspace {
    _dir: TempDir,
    pub auth_file: PathBuf,
    pub session_file: PathBuf,
}

impl Workspace {
    pub fn with_auth_file(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let auth_file = dir.path().join("dbxcli/auth.json");
        let session_file = dir.path().join("dbx-token-refresh/session.toml");

        fs::create_dir_all(auth_file.parent().unwrap()).unwrap();
        fs::write(&auth_file, contents).unwrap();

        Self {
            _dir: dir,
            auth_file,
            session_file,
        }
    }

    pub fn config(&self, refresh_token: Option<&str>) -> Config {
        Config {
            app_key: APP_KEY.to_string(),
            app_secret: APP_SECRET.to_string(),
            auth_file: self.auth_file.clone(),
            session_file: self.session_file.clone(),
            refresh_token: refresh_token.map(str::to_string),
            open_browser: false,
        }
    }

    pub fn auth_file_bytes(&self) -> Vec<u8> {
        fs::read(&self.auth_file).unwrap()
    }

    pub fn auth_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.auth_file_bytes()).unwrap()
    }
}
