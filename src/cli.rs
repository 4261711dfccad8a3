use crate::config::Overrides;
use clap::{App, Arg, ArgMatches, SubCommand};
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub enum Command {
    /// Check the token in dbxcli's auth file and refresh it if needed
    Refresh,
    /// Only authorize the app and save the refresh token
    Auth,
}

pub fn app() -> App<'static, 'static> {
    App::new("dbx-token-refresh")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Keeps the Dropbox access token of dbxcli fresh.")
        .after_help(
            "The app key and secret are read from DROPBOX_PERSONAL_APP_KEY and DROPBOX_PERSONAL_APP_SECRET.",
        )
        .arg(
            Arg::with_name("auth-file")
                .long("auth-file")
                .value_name("PATH")
                .help("dbxcli auth file (Default: ~/.config/dbxcli/auth.json)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("session-file")
                .long("session-file")
                .value_name("PATH")
                .help("Where the refresh token is kept (Default: ~/.config/dbx-token-refresh/session.toml)")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("refresh-token")
                .long("refresh-token")
                .value_name("TOKEN")
                .help("Refresh token to use instead of the saved one. Also read from DROPBOX_PERSONAL_REFRESH_TOKEN")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("browser")
                .long("browser")
                .help("Open the authorization link in the default browser"),
        )
        .subcommand(auth_subcommand())
}

fn auth_subcommand() -> App<'static, 'static> {
    SubCommand::with_name("auth")
        .about("Authorizes the app and saves the refresh token, without touching dbxcli's auth file")
        .after_help("Useful when the saved refresh token was revoked.")
}

pub fn parse(matches: &ArgMatches) -> (Command, Overrides) {
    let command = match matches.subcommand_name() {
        Some("auth") => Command::Auth,
        _ => Command::Refresh,
    };

    let overrides = Overrides {
        auth_file: matches.value_of("auth-file").map(PathBuf::from),
        session_file: matches.value_of("session-file").map(PathBuf::from),
        refresh_token: matches.value_of("refresh-token").map(str::to_string),
        open_browser: matches.is_present("browser"),
    };

    (command, overrides)
}
