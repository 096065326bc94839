//! Implements [Monte Carlo Tree Search] (MCTS) over the duel simulation.
//!
//! [Monte Carlo Tree Search]: https://en.wikipedia.org/wiki/Monte_Carlo_tree_search

use std::time::Duration;

use crate::game::instructions::Instructions;

mod mcts;
mod tree;

pub use mcts::Searcher;

/// Depth of a node in the search tree, in ticks from the root.
pub type Depth = u8;

/// Parameters of the search algorithm.
///
/// The defaults bound one decision to 10 milliseconds or 500 iterations,
/// whichever runs out first, over a tree at most 25 ticks deep.
#[derive(Clone, Debug)]
pub struct Config {
    /// Wall-clock budget for one search, checked once per iteration.
    pub time_budget: Duration,
    /// Iteration cap for one search.
    pub max_iterations: u32,
    /// Exploration constant in the UCT formula.
    pub exploration_constant: f64,
    /// Children visited fewer times than this are picked at random before
    /// UCT takes over.
    pub visit_threshold: u32,
    /// Maximum path length from the root; deeper nodes are terminal.
    pub max_depth: Depth,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(10),
            max_iterations: 500,
            exploration_constant: 1.0,
            visit_threshold: 3,
            max_depth: 25,
        }
    }
}

/// The outcome of one search: the best first move plus statistics for
/// logging and tests.
#[derive(Clone, Debug)]
pub struct Decision {
    /// The chosen instruction for the next tick.
    pub instructions: Instructions,
    /// Utility of the chosen root child.
    pub score: f64,
    /// Iterations actually run before the budget expired.
    pub iterations: u32,
    /// Total nodes materialized in the tree.
    pub nodes: usize,
}
