use std::{num::NonZeroUsize, path::Path, path::PathBuf};

use rand::{rngs::ThreadRng, thread_rng, Rng};

use crate::{
    abstraction::{reward, StateKey},
    algo::{Policy, QLearning},
    ds::QTable,
    env::{Action, GridState, Snapshot},
    error::Result,
    exploration::EpsilonGreedy,
    memory::Transition,
    store::{Mode, TableFile},
};

/// When a training session writes its table to disk
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Rewrite the whole table after every training decision
    ///
    /// At most the current step is lost on a crash.
    #[default]
    EveryUpdate,
    /// Rewrite after every `n` training decisions, on [`QTableAgent::flush`], and on drop
    Every(NonZeroUsize),
}

impl FlushPolicy {
    fn is_due(self, pending: usize) -> bool {
        match self {
            Self::EveryUpdate => pending > 0,
            Self::Every(n) => pending >= n.get(),
        }
    }
}

/// Configuration for the [`QTableAgent`]
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub mode: Mode,
    /// Directory holding the table files
    pub table_dir: PathBuf,
    /// Logical table name, stored as `<table_dir>/<table_name>.json`
    pub table_name: String,
    pub exploration: EpsilonGreedy,
    pub alpha: f64,
    pub gamma: f64,
    pub flush: FlushPolicy,
}

impl AgentConfig {
    /// Train the table named `name`, starting from scratch if it has never been saved
    pub fn train(name: impl Into<String>) -> Self {
        Self {
            mode: Mode::Train,
            table_name: name.into(),
            ..Self::default()
        }
    }

    /// Replay the saved table named `name` without learning
    pub fn evaluate(name: impl Into<String>) -> Self {
        Self {
            mode: Mode::Evaluate,
            table_name: name.into(),
            ..Self::default()
        }
    }

    pub fn table_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.table_dir = dir.into();
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Evaluate,
            table_dir: PathBuf::from("train"),
            table_name: String::from("q"),
            exploration: EpsilonGreedy::default(),
            alpha: 0.1,
            gamma: 0.9,
            flush: FlushPolicy::EveryUpdate,
        }
    }
}

/// A Q-learning agent driven one decision at a time by an external game loop
///
/// The agent owns its table and table file. It remembers only the last
/// [`Transition`]; the first decision of a session has nothing to learn from,
/// every later one (when training) updates the previous transition with the
/// reward of the state it led into. Episode boundaries are not tracked, so
/// learning carries straight across environment restarts.
pub struct QTableAgent<R = ThreadRng> {
    table: QTable,
    file: TableFile,
    mode: Mode,
    policy: Policy,
    learner: QLearning,
    flush: FlushPolicy,
    pending: usize,
    last: Option<Transition>,
    rng: R,
}

impl QTableAgent<ThreadRng> {
    /// Open a session using the thread-local random source
    ///
    /// Fails with [`MissingModel`](crate::Error::MissingModel) when evaluating a table
    /// that was never saved.
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::with_rng(config, thread_rng())
    }
}

impl<R: Rng> QTableAgent<R> {
    /// Open a session drawing its randomness from `rng`
    ///
    /// **Panics** if `alpha` or `gamma` is not in the interval `[0,1]`
    pub fn with_rng(config: AgentConfig, rng: R) -> Result<Self> {
        let learner = QLearning::new(config.alpha, config.gamma);
        let file = TableFile::new(&config.table_dir, &config.table_name);
        let table = file.load(config.mode)?;
        Ok(Self {
            table,
            file,
            mode: config.mode,
            policy: Policy::new(config.exploration),
            learner,
            flush: config.flush,
            pending: 0,
            last: None,
            rng,
        })
    }

    /// Parse a textual state and decide on it
    pub fn choose_action(&mut self, state: &str) -> Result<Action> {
        let snapshot: GridState = state.parse()?;
        self.decide(&snapshot)
    }

    /// Choose the action to take in `snapshot`, learning from the previous step when training
    ///
    /// The action is selected from the table as it stood before this step's update. Errors
    /// only come from persisting the table.
    pub fn decide<S: Snapshot + ?Sized>(&mut self, snapshot: &S) -> Result<Action> {
        let key = StateKey::from_snapshot(snapshot);
        let (action, choice) = self.policy.select(&self.table, &key, &mut self.rng);
        log::trace!("{key} -> {action} ({choice:?})");

        if self.mode.is_training() {
            self.learn(&key, reward(snapshot));
        }
        self.last = Some(Transition::new(key, action));

        if self.mode.is_training() && self.flush.is_due(self.pending) {
            self.flush()?;
        }
        Ok(action)
    }

    fn learn(&mut self, key: &StateKey, reward: f64) {
        match &self.last {
            Some(prev) => {
                self.learner.update(&mut self.table, prev, key, reward);
            }
            None => {
                self.table.ensure(key);
            }
        }
        self.pending += 1;
    }
}

impl<R> QTableAgent<R> {
    /// Write any unsaved training progress to the table file
    ///
    /// Does nothing when evaluating or when nothing changed since the last write.
    pub fn flush(&mut self) -> Result<()> {
        if !self.mode.is_training() || self.pending == 0 {
            return Ok(());
        }
        self.file.save(&self.table)?;
        self.pending = 0;
        Ok(())
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Location of the table file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// The key and action of the most recent decision
    pub fn last_transition(&self) -> Option<&Transition> {
        self.last.as_ref()
    }

    /// `true` until the first decision has been made
    pub fn is_awaiting_first_decision(&self) -> bool {
        self.last.is_none()
    }
}

impl<R> Drop for QTableAgent<R> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            log::warn!("Unsaved Q-table progress lost: {e}");
        }
    }
}
