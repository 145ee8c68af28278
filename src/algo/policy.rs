use rand::Rng;
use strum::VariantArray;

use crate::{
    abstraction::StateKey,
    ds::QTable,
    env::Action,
    exploration::{Choice, EpsilonGreedy},
};

/// Epsilon greedy action selection over a [`QTable`]
///
/// Exploits by taking the highest valued action of a key, preferring the action listed first
/// in the key's row when several share the maximum. Unknown keys and empty rows fall back to a
/// uniformly random action, as does every exploration step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Policy {
    exploration: EpsilonGreedy,
}

impl Policy {
    pub fn new(exploration: EpsilonGreedy) -> Self {
        Self { exploration }
    }

    /// Select an action for `key`
    ///
    /// **Returns** the action and whether it was an exploration step
    pub fn select<R: Rng + ?Sized>(
        &self,
        table: &QTable,
        key: &StateKey,
        rng: &mut R,
    ) -> (Action, Choice) {
        let greedy = match self.exploration.choose(rng) {
            Choice::Explore => None,
            Choice::Exploit => table.best_action(key),
        };
        match greedy {
            Some(action) => (action, Choice::Exploit),
            None => (random_action(rng), Choice::Explore),
        }
    }
}

/// A uniformly random action from the full action set
pub fn random_action<R: Rng + ?Sized>(rng: &mut R) -> Action {
    Action::VARIANTS[rng.gen_range(0..Action::VARIANTS.len())]
}
