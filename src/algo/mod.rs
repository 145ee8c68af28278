mod policy;
mod q_learning;

pub use policy::{random_action, Policy};
pub use q_learning::QLearning;
