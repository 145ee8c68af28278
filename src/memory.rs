use crate::{abstraction::StateKey, env::Action};

/// The agent's one-step memory: the key it last decided from and the action it chose
///
/// Only the most recent step is kept, so each update bootstraps from a single transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Key of the state the action was chosen in
    pub key: StateKey,
    /// The action chosen in that state
    pub action: Action,
}

impl Transition {
    pub fn new(key: StateKey, action: Action) -> Self {
        Self { key, action }
    }
}
