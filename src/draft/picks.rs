//! Pick resolution against a generated draft order.
//!
//! Pick numbers are 1-indexed. Out-of-range lookups come back as `None`;
//! only a zero participant count is an error.

use serde::Serialize;

use super::TeamId;
use super::order::DraftOrder;
use crate::error::AppError;

/// Everything a caller needs to announce a pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickSlot {
    pub pick_number: u32,
    pub round: u32,
    /// Position inside the round, 1-indexed
    pub pick_in_round: u32,
    pub team_id: TeamId,
    pub is_last_of_round: bool,
}

fn require_participants(num_participants: u32) -> Result<(), AppError> {
    if num_participants == 0 {
        return Err(AppError::invalid_input(
            "number of participants must be at least 1",
        ));
    }
    Ok(())
}

/// Returns the team holding `pick_number`, or `None` outside `1..=order.len()`.
pub fn team_for_pick(order: &DraftOrder, pick_number: u32) -> Option<&TeamId> {
    let index = (pick_number as usize).checked_sub(1)?;
    order.as_slice().get(index)
}

/// Returns the 1-indexed round of a pick: `ceil(pick_number / num_participants)`.
///
/// # Example
/// ```
/// use liiga_fantasy::draft::round_number;
///
/// assert_eq!(round_number(13, 12).unwrap(), 2);
/// assert_eq!(round_number(25, 12).unwrap(), 3);
/// ```
pub fn round_number(pick_number: u32, num_participants: u32) -> Result<u32, AppError> {
    require_participants(num_participants)?;
    Ok(pick_number.div_ceil(num_participants))
}

/// True when `pick_number` closes its round, which is where a snake draft turns around.
pub fn is_last_pick_of_round(pick_number: u32, num_participants: u32) -> Result<bool, AppError> {
    require_participants(num_participants)?;
    Ok(pick_number % num_participants == 0)
}

/// Number of picks in a draft. Zero teams or zero roster slots simply means no picks.
pub fn total_picks(num_participants: u32, roster_size: u32) -> u32 {
    num_participants.saturating_mul(roster_size)
}

/// Resolves a pick into its round, in-round position and owning team.
pub fn resolve_pick(
    order: &DraftOrder,
    pick_number: u32,
    num_participants: u32,
) -> Result<Option<PickSlot>, AppError> {
    require_participants(num_participants)?;
    let Some(team_id) = team_for_pick(order, pick_number) else {
        return Ok(None);
    };
    let round = round_number(pick_number, num_participants)?;
    Ok(Some(PickSlot {
        pick_number,
        round,
        pick_in_round: pick_number - (round - 1) * num_participants,
        team_id: team_id.clone(),
        is_last_of_round: is_last_pick_of_round(pick_number, num_participants)?,
    }))
}
