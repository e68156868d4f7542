pub mod agent;
pub mod board;
pub mod error;
pub mod experiment;
pub mod position;
pub mod solver;

pub use agent::{Agent, AgentOptions};
pub use board::{Board, Cell};
pub use error::{GameError, SolverError};
pub use position::Position;
pub use solver::{Clue, ClueSolver, Info, Strategy};
