//! The search driver: owns the tree for one decision and runs the
//! selection/playout/backpropagation loop under the budget.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::BattleConfig;
use crate::evaluation::{utility, ScoreWeights};
use crate::game::state::Gamestate;
use crate::search::tree::{NodeId, Tree};
use crate::search::{Config, Decision};

/// Runs Monte-Carlo tree searches over duel snapshots.
///
/// One `search` call owns its tree exclusively and discards it on return;
/// nothing is shared across decisions. The random source drives playout
/// sampling and forced exploration and is seedable for reproducibility.
pub struct Searcher {
    config: Config,
    battle: BattleConfig,
    weights: ScoreWeights,
    rng: StdRng,
}

impl Searcher {
    /// Creates a searcher with an entropy-seeded random source.
    #[must_use]
    pub fn new(config: Config, battle: BattleConfig, weights: ScoreWeights) -> Self {
        Self {
            config,
            battle,
            weights,
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a searcher with a fixed seed. Repeated searches from equal
    /// snapshots produce identical decisions.
    #[must_use]
    pub fn with_seed(
        config: Config,
        battle: BattleConfig,
        weights: ScoreWeights,
        seed: u64,
    ) -> Self {
        Self {
            config,
            battle,
            weights,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Searches for the best instruction starting from `root`.
    ///
    /// Returns `None` when the root has no legal instructions (the robot
    /// is disabled or already destroyed); the adapter should then hold its
    /// current actuator state.
    pub fn search(&mut self, root: Gamestate) -> Option<Decision> {
        let mut tree = Tree::new(root);
        let started = Instant::now();

        let mut iterations = 0;
        while started.elapsed() < self.config.time_budget
            && iterations < self.config.max_iterations
        {
            // Selection + expansion.
            let selected = self.select(&mut tree);
            // Playout.
            let reward = self.playout(&tree, selected);
            // Backpropagation, from the selected node up to the root.
            let mut current = Some(selected);
            while let Some(id) = current {
                tree.update_values(id, reward);
                current = tree.parent(id);
            }
            iterations += 1;
        }

        // The decision is the root child with the highest utility; ties go
        // to the first one encountered.
        let mut best: Option<NodeId> = None;
        let mut best_score = f64::NEG_INFINITY;
        for &child in tree.children(NodeId::ROOT) {
            let score = tree.score(child, &self.weights);
            if score > best_score {
                best = Some(child);
                best_score = score;
            }
        }

        best.and_then(|child| {
            tree.get(child)
                .state
                .instructions
                .map(|instructions| Decision {
                    instructions,
                    score: best_score,
                    iterations,
                    nodes: tree.len(),
                })
        })
    }

    /// Descends from the root along `best_child` picks, expanding the
    /// first non-fully-expanded node on the way. Stops at a terminal node
    /// or at the node expansion handed back.
    fn select(&mut self, tree: &mut Tree) -> NodeId {
        let mut current = NodeId::ROOT;
        while !tree.is_terminal(current, &self.config) {
            if tree.is_fully_expanded(current) {
                match tree.best_child(current, &self.config, &self.weights, &mut self.rng) {
                    Some(child) => current = child,
                    None => break,
                }
            } else {
                match tree.expand(
                    current,
                    &self.battle,
                    &self.config,
                    &self.weights,
                    &mut self.rng,
                ) {
                    Some(child) => return child,
                    // Empty expansion: a dead end handled as terminal.
                    None => break,
                }
            }
        }
        current
    }

    /// Rolls the duel forward with uniformly random legal instructions for
    /// our side (the opponent follows the policy) until a terminal state,
    /// and scores the final snapshot.
    fn playout(&mut self, tree: &Tree, from: NodeId) -> f64 {
        let mut state = tree.get(from).state.clone();
        let mut depth = tree.depth(from);

        while !state.is_over() && depth < self.config.max_depth {
            let moves = state.legal_instructions();
            if moves.is_empty() {
                break;
            }
            let instruction = moves[self.rng.gen_range(0..moves.len())];
            state = state.simulate_turn(&instruction, None, &self.battle);
            depth = depth.saturating_add(1);
        }

        utility(&state, &self.weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::robot::{RobotState, RobotStatus};

    fn root_state() -> Gamestate {
        Gamestate::new(
            RobotState::new("us", 100.0, 25.0, 25.0),
            RobotState::new("them", 100.0, 75.0, 75.0),
            Vec::new(),
        )
    }

    // A generous time budget makes the iteration cap the binding limit,
    // which keeps seeded runs deterministic even under slow debug builds.
    fn quick_config() -> Config {
        Config {
            time_budget: std::time::Duration::from_secs(30),
            max_iterations: 40,
            ..Config::default()
        }
    }

    #[test]
    fn returns_a_legal_first_move() {
        let battle = BattleConfig::with_arena(100.0, 100.0);
        let mut searcher = Searcher::with_seed(
            quick_config(),
            battle.clone(),
            ScoreWeights::default(),
            42,
        );
        let root = root_state();
        let legal = root.legal_instructions();

        let decision = searcher.search(root).expect("a legal move exists");
        assert!(legal.contains(&decision.instructions));
        assert!(decision.iterations > 0);
        assert!(decision.nodes > 1);
    }

    #[test]
    fn disabled_robot_has_no_decision() {
        let battle = BattleConfig::with_arena(100.0, 100.0);
        let mut searcher =
            Searcher::with_seed(quick_config(), battle, ScoreWeights::default(), 42);
        let mut root = root_state();
        root.us.status = RobotStatus::Disabled;
        assert!(searcher.search(root).is_none());
    }

    #[test]
    fn destroyed_root_has_no_decision() {
        let battle = BattleConfig::with_arena(100.0, 100.0);
        let mut searcher =
            Searcher::with_seed(quick_config(), battle, ScoreWeights::default(), 42);
        let mut root = root_state();
        root.us.status = RobotStatus::Destroyed;
        root.us.energy = 0.0;
        assert!(searcher.search(root).is_none());
    }

    #[test]
    fn seeded_searches_are_reproducible() {
        let battle = BattleConfig::with_arena(100.0, 100.0);
        let first = Searcher::with_seed(
            quick_config(),
            battle.clone(),
            ScoreWeights::default(),
            7,
        )
        .search(root_state())
        .unwrap();
        let second = Searcher::with_seed(quick_config(), battle, ScoreWeights::default(), 7)
            .search(root_state())
            .unwrap();
        assert_eq!(first.instructions, second.instructions);
    }
}
