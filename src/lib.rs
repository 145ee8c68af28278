//! A tabular Q-learning agent for discrete grid games
//!
//! The game loop hands the agent one textual state per step through
//! [`QTableAgent::choose_action`] and gets back the move to make. While training,
//! the agent learns from every step and keeps its Q-table on disk so later runs
//! pick up where earlier ones stopped.

/// Reduction of snapshots to state keys, and the reward signal
pub mod abstraction;

/// The agent session driven by the game loop
pub mod agent;

/// Action selection and learning rules
pub mod algo;

/// Data structures
pub mod ds;

/// Environment contract
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// One-step transition memory
pub mod memory;

/// Table persistence
pub mod store;

mod util;

pub use agent::{AgentConfig, FlushPolicy, QTableAgent};
pub use error::{Error, Result};
