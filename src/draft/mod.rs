//! Draft order generation and pick resolution.
//!
//! A draft order is generated once when the draft is created and never
//! mutated afterwards. Everything else in this module is a pure lookup
//! against that order.

pub mod order;
pub mod picks;

pub use order::{
    DraftOrder, DraftType, generate_linear_order, generate_order, generate_snake_order, shuffle,
    shuffle_with,
};
pub use picks::{
    PickSlot, is_last_pick_of_round, resolve_pick, round_number, team_for_pick, total_picks,
};

/// Opaque fantasy team identifier
pub type TeamId = String;
