//! Tree search over Freecell deals.
//!
//! Depth-first, breadth-first, greedy best-first and A* searches share one
//! driver and differ only in how the frontier orders pending nodes.
mod error;
mod frontier;
mod helper;
mod move_;
mod node;
mod rules;
mod solver;
mod strategy;

use crate::frontier::*;
use crate::helper::*;
use crate::move_::*;
use crate::node::*;
use crate::rules::*;

use freecell_common::{action::*, board::*};
use smallvec::SmallVec;

pub use crate::error::SolveError;
pub use crate::solver::{Outcome, SearchState, SolveResult, Solver, SolverConfig, solve};
pub use crate::strategy::Strategy;
