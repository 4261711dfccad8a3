pub mod auth;
pub mod cli;
pub mod config;
pub mod dbxcli;
pub mod dropbox;
pub mod files;
pub mod log;
pub mod readline;
pub mod refresh;
mod requests;
pub mod user;
