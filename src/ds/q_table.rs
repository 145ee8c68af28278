use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::{abstraction::StateKey, env::Action};

/// Action values recorded for one state key, in first-seen order
pub type Row = IndexMap<Action, f64>;

/// The learned action values, indexed by [`StateKey`]
///
/// Both levels of the table keep insertion order. Rows created through [`QTable::ensure`]
/// list the whole action set in [`Action`] declaration order; rows read from a file keep
/// the order they were written in. [`QTable::best_action`] relies on that order to break ties.
///
/// Keys are never removed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QTable {
    rows: IndexMap<StateKey, Row>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` with every action valued at `0.0`, unless it is already present
    ///
    /// **Returns** `true` if the key was inserted
    pub fn ensure(&mut self, key: &StateKey) -> bool {
        if self.rows.contains_key(key) {
            return false;
        }
        self.rows.insert(
            key.clone(),
            Action::VARIANTS.iter().map(|&a| (a, 0.0)).collect(),
        );
        true
    }

    /// The recorded action values for `key`
    pub fn row(&self, key: &StateKey) -> Option<&Row> {
        self.rows.get(key)
    }

    /// The value of `action` in `key`, if recorded
    pub fn get(&self, key: &StateKey, action: Action) -> Option<f64> {
        self.rows.get(key)?.get(&action).copied()
    }

    /// Set the value of `action` in `key`, creating the row or entry if needed
    pub fn set(&mut self, key: &StateKey, action: Action, value: f64) {
        if let Some(row) = self.rows.get_mut(key) {
            row.insert(action, value);
        } else {
            self.rows.insert(key.clone(), Row::from([(action, value)]));
        }
    }

    /// The action with the highest value for `key`
    ///
    /// Ties go to the action that comes first in the row. Returns `None` if the key is unknown
    /// or its row is empty.
    pub fn best_action(&self, key: &StateKey) -> Option<Action> {
        let row = self.rows.get(key)?;
        let (&first, _) = row.first()?;
        let (best, _) = row
            .iter()
            .fold((first, f64::NEG_INFINITY), |(best, max), (&a, &v)| {
                if v > max {
                    (a, v)
                } else {
                    (best, max)
                }
            });
        Some(best)
    }

    /// The highest value recorded for `key`, or `None` if the key is unknown or its row is empty
    pub fn max_value(&self, key: &StateKey) -> Option<f64> {
        self.rows
            .get(key)?
            .values()
            .copied()
            .reduce(f64::max)
    }

    /// Number of state keys
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
