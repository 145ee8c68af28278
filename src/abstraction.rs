//! Reduction of a full snapshot to the compact key the Q-table is indexed by

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env::Snapshot;

/// Symbol standing in for an empty or out-of-bounds cell in a key
pub const PLACEHOLDER: char = '_';

/// Reward for an episode that ended without reaching the goal
pub const FAILURE_PENALTY: f64 = -10.0;

/// Cell offsets `(dx, dy)` around the controlled entity that make up a key, in key order
///
/// The window is deliberately lopsided towards the cells the entity is about to move into.
pub const NEIGHBORHOOD: [(i64, i64); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, 0), (1, -1)];

/// A lossy summary of a snapshot: the symbols in the [`NEIGHBORHOOD`] of the controlled entity
///
/// Snapshots that only differ outside the neighborhood share a key.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateKey(String);

impl StateKey {
    /// Compute the key of a snapshot
    pub fn from_snapshot<S: Snapshot + ?Sized>(snapshot: &S) -> Self {
        let (x, y) = (snapshot.x(), snapshot.y());
        Self(
            NEIGHBORHOOD
                .iter()
                .map(|&(dx, dy)| {
                    x.checked_add(dx)
                        .zip(y.checked_add(dy))
                        .and_then(|(cx, cy)| snapshot.get(cx, cy))
                        .unwrap_or(PLACEHOLDER)
                })
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reward of a snapshot: the score on reaching the goal, [`FAILURE_PENALTY`] on any other
/// termination, nothing otherwise
pub fn reward<S: Snapshot + ?Sized>(snapshot: &S) -> f64 {
    if snapshot.at_goal() {
        snapshot.score() as f64
    } else if snapshot.is_done() {
        FAILURE_PENALTY
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use crate::env::GridState;

    use super::*;

    fn state(text: &str) -> GridState {
        text.parse().unwrap()
    }

    #[test]
    fn key_reads_neighborhood_in_order() {
        // Neighbors of (1, 1): (0,0)=a (0,1)=b (1,0)=c (1,2)=d (2,1)=e (2,0)=f
        let s = state("x=1 y=1 score=0\nacf\nbFe\n.d.");
        assert_eq!(StateKey::from_snapshot(&s).as_str(), "abcdef");
    }

    #[test]
    fn key_uses_placeholder_for_empty_and_outside() {
        let s = state("x=0 y=0 score=0\nF.\nC.");
        assert_eq!(
            StateKey::from_snapshot(&s).as_str(),
            "___C__",
            "Only the cell below is occupied"
        );
    }

    #[test]
    fn key_ignores_cells_outside_neighborhood() {
        let a = state("x=1 y=1 score=0\nCCC..\n.F.TT\n.L...\nWWWWW");
        let b = state("x=1 y=1 score=99\nCCC.T\n.F...\n.L.LL\n.....");
        assert_eq!(
            StateKey::from_snapshot(&a),
            StateKey::from_snapshot(&b),
            "Differences outside the window do not change the key"
        );

        let c = state("x=1 y=1 score=0\nCC...\n.F.TT\n.L...\nWWWWW");
        assert_ne!(
            StateKey::from_snapshot(&a),
            StateKey::from_snapshot(&c),
            "A change inside the window changes the key"
        );
    }

    #[test]
    fn key_at_extreme_coordinates() {
        let s = state(&format!("x={} y={} score=0\nCCC\nCCC", i64::MAX, i64::MIN));
        assert_eq!(
            StateKey::from_snapshot(&s).as_str(),
            "______",
            "Neighbors past the coordinate range are absent"
        );

        let s = state(&format!("x={} y=1 score=0\nCCC\nCCC", i64::MIN));
        assert_eq!(StateKey::from_snapshot(&s).as_str(), "______");
    }

    #[test]
    fn key_is_deterministic() {
        let s = state("x=2 y=1 score=0\nabcd\nefgh\nijkl");
        assert_eq!(StateKey::from_snapshot(&s), StateKey::from_snapshot(&s));
    }

    #[test]
    fn terminal_rewards() {
        assert_eq!(reward(&state("x=0 y=0 score=5 done=1")), -10.0, "Failure");
        assert_eq!(
            reward(&state("x=0 y=0 score=37 goal=1 done=1")),
            37.0,
            "Goal pays the score"
        );
        assert_eq!(reward(&state("x=0 y=0 score=37 goal=1")), 37.0);
        assert_eq!(reward(&state("x=0 y=0 score=12")), 0.0, "No shaping");
    }
}
