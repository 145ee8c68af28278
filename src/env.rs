use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

pub mod grid;

pub use grid::GridState;

/// The closed set of moves the environment understands
///
/// The declaration order is the canonical order of the action set: freshly created
/// table rows list their actions in this order, which makes it the tie-break order
/// of the greedy policy.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Display,
    EnumString,
    VariantArray,
    Serialize,
    Deserialize,
)]
pub enum Action {
    #[strum(to_string = "u")]
    #[serde(rename = "u")]
    Up,
    #[strum(to_string = "d")]
    #[serde(rename = "d")]
    Down,
    #[strum(to_string = "l")]
    #[serde(rename = "l")]
    Left,
    #[strum(to_string = "r")]
    #[serde(rename = "r")]
    Right,
    #[strum(to_string = "_")]
    #[serde(rename = "_")]
    Stay,
}

/// A read-only view of one environment state, as seen by the agent for a single decision
///
/// Coordinates are signed so that neighbor lookups may step outside the grid.
pub trait Snapshot {
    /// The category symbol occupying cell `(x, y)`, or `None` if the cell is empty or out of bounds
    fn get(&self, x: i64, y: i64) -> Option<char>;

    /// Column of the controlled entity
    fn x(&self) -> i64;

    /// Row of the controlled entity
    fn y(&self) -> i64;

    /// Whether the controlled entity has reached the goal
    fn at_goal(&self) -> bool;

    /// Whether the episode has ended, by reaching the goal or by failing
    fn is_done(&self) -> bool;

    /// The current game score
    fn score(&self) -> i64;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn action_tokens() {
        let tokens: Vec<String> = Action::VARIANTS.iter().map(|a| a.to_string()).collect();
        assert_eq!(tokens, ["u", "d", "l", "r", "_"], "Canonical order and tokens");

        assert_eq!(Action::from_str("l").unwrap(), Action::Left, "Token parses");
        assert!(Action::from_str("x").is_err(), "Unknown token rejected");
    }

    #[test]
    fn action_json_tokens() {
        assert_eq!(serde_json::to_string(&Action::Stay).unwrap(), "\"_\"");
        let action: Action = serde_json::from_str("\"r\"").unwrap();
        assert_eq!(action, Action::Right);
    }
}
