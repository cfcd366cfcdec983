pub mod tabular;

pub use tabular::{
    q_learning::{QLearner, QLearnerConfig},
    q_table::{Entry, QTable},
};
