use anyhow::Result;
use chrono::Utc;
use dbx_token_refresh::{
    cli::{self, Command},
    config::{Config, Overrides},
    dropbox::{errors::DropboxError, Client},
    log, refresh,
};
use std::io;
use std::process::exit;

fn main() {
    let matches = cli::app().get_matches();
    let (command, overrides) = cli::parse(&matches);

    if let Err(e) = run(command, overrides) {
        match e.downcast_ref::<DropboxError>() {
            Some(DropboxError::Authorization(_)) | Some(DropboxError::MissingRefreshToken) => {
                println!("Error: {}", e);
            }
            _ => log::error(format!("{:#}", e)),
        }
        exit(1);
    }
}

fn run(command: Command, overrides: Overrides) -> Result<()> {
    let config = Config::load(overrides)?;
    let client = Client::new(&config.app_key, &config.app_secret)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match command {
        Command::Auth => {
            refresh::authorize_and_store(&config, &client, &mut input, &mut output)?;
        }
        Command::Refresh => {
            log::info(format!("Checking access token in {:?}", config.auth_file));
            refresh::run(&config, &client, &mut input, &mut output, Utc::now())?;
        }
    }

    Ok(())
}
