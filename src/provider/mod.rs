//! Import of league, team and player data from the external stats provider.

pub mod fetch_utils;
pub mod http_client;
pub mod import;
pub mod models;
pub mod urls;

pub use http_client::create_http_client_with_timeout;
pub use import::{ImportSummary, import_league, to_player};
