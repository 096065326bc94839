//! The search tree: an arena of nodes addressed by integer ids.
//!
//! Children are owned by the arena; the parent link is an id used only
//! for read-only upward traversal during backpropagation, which sidesteps
//! the cyclic ownership a pointer-based tree would need.

use rand::Rng;

use crate::config::BattleConfig;
use crate::evaluation::{utility, ScoreWeights};
use crate::game::state::Gamestate;
use crate::search::{Config, Depth};

/// Index of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct NodeId(usize);

impl NodeId {
    pub(super) const ROOT: Self = Self(0);
}

pub(super) struct Node {
    pub(super) state: Gamestate,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    visits: u32,
    average_score: f64,
    max_score: f64,
    depth: Depth,
}

pub(super) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(super) fn new(root: Gamestate) -> Self {
        Self {
            nodes: vec![Node {
                state: root,
                parent: None,
                children: Vec::new(),
                visits: 0,
                average_score: 0.0,
                max_score: 0.0,
                depth: 0,
            }],
        }
    }

    pub(super) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(super) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub(super) fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    pub(super) fn depth(&self, id: NodeId) -> Depth {
        self.get(id).depth
    }

    pub(super) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Utility of the node's snapshot. This, not the playout average, is
    /// what UCT exploits and what the final root scan compares.
    pub(super) fn score(&self, id: NodeId, weights: &ScoreWeights) -> f64 {
        utility(&self.get(id).state, weights)
    }

    /// A node is terminal when either robot is destroyed, the depth limit
    /// is reached, or no legal instruction exists (a dead end that could
    /// otherwise recurse forever in selection).
    pub(super) fn is_terminal(&self, id: NodeId, config: &Config) -> bool {
        let node = self.get(id);
        node.state.is_over()
            || node.depth >= config.max_depth
            || node.state.legal_instructions().is_empty()
    }

    /// Whether every legal instruction already has a child.
    pub(super) fn is_fully_expanded(&self, id: NodeId) -> bool {
        let node = self.get(id);
        node.children.len() == node.state.legal_instructions().len()
    }

    /// Picks the most promising child: children under the visit threshold
    /// are drawn uniformly at random first (forced exploration); once all
    /// clear it, the UCT argmax wins, ties to the first encountered.
    pub(super) fn best_child<R: Rng>(
        &self,
        id: NodeId,
        config: &Config,
        weights: &ScoreWeights,
        rng: &mut R,
    ) -> Option<NodeId> {
        let node = self.get(id);
        if node.children.is_empty() {
            return None;
        }

        let beneath_threshold: Vec<NodeId> = node
            .children
            .iter()
            .copied()
            .filter(|&child| self.get(child).visits < config.visit_threshold)
            .collect();
        if !beneath_threshold.is_empty() {
            return Some(beneath_threshold[rng.gen_range(0..beneath_threshold.len())]);
        }

        let parent_visits = f64::from(node.visits.max(1));
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for &child in &node.children {
            let child_visits = f64::from(self.get(child).visits);
            let exploration =
                config.exploration_constant * (parent_visits.ln() / child_visits).sqrt();
            let uct = self.score(child, weights) + exploration;
            if uct > best_value {
                best = Some(child);
                best_value = uct;
            }
        }
        best
    }

    /// Materializes a child per legal instruction (the opponent side is
    /// filled in by the heuristic policy), then immediately picks the best
    /// of the new children. Returns `None` for a dead end.
    pub(super) fn expand<R: Rng>(
        &mut self,
        id: NodeId,
        battle: &BattleConfig,
        config: &Config,
        weights: &ScoreWeights,
        rng: &mut R,
    ) -> Option<NodeId> {
        let state = self.get(id).state.clone();
        let depth = self.get(id).depth;

        for instruction in state.legal_instructions() {
            let child_state = state.simulate_turn(&instruction, None, battle);
            let child_id = NodeId(self.nodes.len());
            self.nodes.push(Node {
                state: child_state,
                parent: Some(id),
                children: Vec::new(),
                visits: 0,
                average_score: 0.0,
                max_score: 0.0,
                depth: depth.saturating_add(1),
            });
            self.nodes[id.0].children.push(child_id);
        }

        self.best_child(id, config, weights, rng)
    }

    /// Folds a playout reward into the node statistics: the running
    /// average is recomputed as the mean of the children's averages
    /// (childless nodes divide by 1) and the maximum reward is tracked.
    pub(super) fn update_values(&mut self, id: NodeId, score: f64) {
        let children = self.get(id).children.clone();
        let sum: f64 = children
            .iter()
            .map(|&child| self.get(child).average_score)
            .sum();

        let node = &mut self.nodes[id.0];
        node.visits += 1;
        node.average_score = sum / children.len().max(1) as f64;
        if score > node.max_score {
            node.max_score = score;
        }
    }

    #[cfg(test)]
    pub(super) fn visits(&self, id: NodeId) -> u32 {
        self.get(id).visits
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::robot::{RobotState, RobotStatus};

    fn root_state() -> Gamestate {
        Gamestate::new(
            RobotState::new("us", 100.0, 25.0, 25.0),
            RobotState::new("them", 100.0, 75.0, 75.0),
            Vec::new(),
        )
    }

    #[test]
    fn expand_materializes_all_legal_children() {
        let battle = BattleConfig::with_arena(100.0, 100.0);
        let config = Config::default();
        let weights = ScoreWeights::default();
        let mut rng = StdRng::seed_from_u64(7);

        let state = root_state();
        let legal = state.legal_instructions().len();
        let mut tree = Tree::new(state);

        let picked = tree.expand(NodeId::ROOT, &battle, &config, &weights, &mut rng);
        assert!(picked.is_some());
        assert_eq!(tree.children(NodeId::ROOT).len(), legal);
        assert!(tree.is_fully_expanded(NodeId::ROOT));
        for &child in tree.children(NodeId::ROOT) {
            assert_eq!(tree.parent(child), Some(NodeId::ROOT));
            assert_eq!(tree.depth(child), 1);
            assert!(tree.get(child).state.instructions.is_some());
        }
    }

    #[test]
    fn dead_end_is_terminal() {
        let config = Config::default();
        let mut state = root_state();
        state.us.status = RobotStatus::Disabled;
        let mut tree = Tree::new(state);

        assert!(tree.is_terminal(NodeId::ROOT, &config));
        let battle = BattleConfig::with_arena(100.0, 100.0);
        let weights = ScoreWeights::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(tree
            .expand(NodeId::ROOT, &battle, &config, &weights, &mut rng)
            .is_none());
        assert!(tree.children(NodeId::ROOT).is_empty());
    }

    #[test]
    fn destroyed_robot_is_terminal() {
        let config = Config::default();
        let mut state = root_state();
        state.enemy.status = RobotStatus::Destroyed;
        state.enemy.energy = 0.0;
        let tree = Tree::new(state);
        assert!(tree.is_terminal(NodeId::ROOT, &config));
    }

    #[test]
    fn forced_exploration_before_uct() {
        let battle = BattleConfig::with_arena(100.0, 100.0);
        let config = Config::default();
        let weights = ScoreWeights::default();
        let mut rng = StdRng::seed_from_u64(7);

        let mut tree = Tree::new(root_state());
        let _ = tree.expand(NodeId::ROOT, &battle, &config, &weights, &mut rng);

        // All children are unvisited: the pick must be one of them, chosen
        // by the forced-exploration branch.
        let picked = tree
            .best_child(NodeId::ROOT, &config, &weights, &mut rng)
            .unwrap();
        assert!(tree.children(NodeId::ROOT).contains(&picked));
        assert_eq!(tree.visits(picked), 0);
    }

    #[test]
    fn update_values_tracks_visits_and_max() {
        let mut tree = Tree::new(root_state());
        tree.update_values(NodeId::ROOT, 12.5);
        tree.update_values(NodeId::ROOT, 3.0);
        assert_eq!(tree.visits(NodeId::ROOT), 2);
        assert!((tree.get(NodeId::ROOT).max_score - 12.5).abs() < f64::EPSILON);
        // Childless node: the average stays the children mean over a
        // denominator of 1, i.e. zero.
        assert!((tree.get(NodeId::ROOT).average_score - 0.0).abs() < f64::EPSILON);
    }
}
