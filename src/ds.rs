//! Data structures

mod q_table;

pub use q_table::{QTable, Row};
