//! Fantasy league manager for the Finnish Hockey League (Liiga)
//!
//! This library imports a fantasy league and its players from an external
//! stats provider, runs snake or auction drafts against that data and ranks
//! teams by the fantasy points of their rostered players.
//!
//! # Examples
//!
//! ```rust,no_run
//! use liiga_fantasy::error::AppError;
//! use liiga_fantasy::scoring::ScoringRules;
//! use liiga_fantasy::service::{create_draft, league_standings, submit_pick};
//! use liiga_fantasy::store::load_snapshot;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let store = load_snapshot("league_data.json").await?;
//!
//!     let draft = create_draft(&store, "office", None).await?;
//!     if let Some(team) = &draft.current_team {
//!         submit_pick(&store, &draft.id, team, "8478402").await?;
//!     }
//!
//!     let standings = league_standings(&store, "office", &ScoringRules::default()).await?;
//!     for standing in &standings.standings {
//!         println!("{}. {} {:.2}", standing.rank, standing.team_name, standing.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod draft;
pub mod error;
pub mod logging;
pub mod provider;
pub mod scoring;
pub mod service;
pub mod standings;
pub mod store;

// Re-export commonly used types for convenience
pub use config::Config;
pub use draft::{DraftOrder, DraftType, PickSlot};
pub use error::AppError;
pub use scoring::{PlayerStats, ScoringRules};
pub use standings::{Standing, StandingsSnapshot};
pub use store::{LeagueStore, MemoryStore};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
