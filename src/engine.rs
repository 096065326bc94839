//! The boundary the host battle adapter talks to.
//!
//! The host engine drives its robots through callbacks (run loop, scan
//! events). This module turns that into an explicit state machine: the
//! adapter feeds in telemetry snapshots and scan events, and reads out
//! one chosen instruction per turn. The adapter stays responsible for
//! issuing actuator commands and for reporting the projectiles it
//! actually fired.

use crate::config::{BattleConfig, STARTING_ENERGY};
use crate::evaluation::ScoreWeights;
use crate::game::{Gamestate, Instructions, Projectile, RobotState};
use crate::search::{self, Searcher};

/// Decision engine for one robot in a duel.
pub struct Engine {
    battle: BattleConfig,
    searcher: Searcher,
    /// Latest opponent estimate, updated by scan events.
    enemy: RobotState,
    /// Projectiles known to be in flight, reported and aged by the
    /// adapter between turns.
    projectiles: Vec<Projectile>,
}

impl Engine {
    /// Creates an engine for the given arena. Until the first scan event
    /// arrives, the opponent is assumed to sit at the arena center with
    /// full energy.
    #[must_use]
    pub fn new(battle: BattleConfig, config: search::Config, weights: ScoreWeights) -> Self {
        let enemy = RobotState::new("enemy", STARTING_ENERGY, battle.width / 2.0, battle.height / 2.0);
        let searcher = Searcher::new(config, battle.clone(), weights);
        Self {
            battle,
            searcher,
            enemy,
            projectiles: Vec::new(),
        }
    }

    /// Same as [`Engine::new`] with a fixed random seed, for reproducible
    /// runs.
    #[must_use]
    pub fn with_seed(
        battle: BattleConfig,
        config: search::Config,
        weights: ScoreWeights,
        seed: u64,
    ) -> Self {
        let enemy = RobotState::new("enemy", STARTING_ENERGY, battle.width / 2.0, battle.height / 2.0);
        let searcher = Searcher::with_seed(config, battle.clone(), weights, seed);
        Self {
            battle,
            searcher,
            enemy,
            projectiles: Vec::new(),
        }
    }

    /// Folds a radar scan event into the opponent estimate. `bearing` is
    /// relative to the observer's body heading; `distance` in pixels.
    pub fn observe_scan(
        &mut self,
        observer: &RobotState,
        bearing: f64,
        distance: f64,
        energy: f64,
        velocity: f64,
        heading: f64,
    ) {
        self.enemy = RobotState::from_scan(
            observer,
            &self.enemy.name,
            bearing,
            distance,
            energy,
            velocity,
            heading,
        );
    }

    /// Records a projectile the adapter actually fired, so the next
    /// search accounts for it.
    pub fn record_shot(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Advances all tracked projectiles by one tick. The adapter calls
    /// this once per turn, between decisions.
    pub fn age_projectiles(&mut self) {
        self.projectiles = self
            .projectiles
            .iter()
            .map(|projectile| projectile.advance(&self.battle))
            .filter(|projectile| projectile.active)
            .collect();
    }

    /// Latest opponent estimate.
    #[must_use]
    pub fn enemy(&self) -> &RobotState {
        &self.enemy
    }

    /// Runs one search from the given telemetry snapshot and returns the
    /// chosen instruction. Returns `None` when no legal move exists; the
    /// adapter then holds its current actuator state.
    pub fn decide(&mut self, me: RobotState) -> Option<Instructions> {
        let root = Gamestate::new(me, self.enemy.clone(), self.projectiles.clone());
        self.searcher
            .search(root)
            .map(|decision| decision.instructions)
    }
}
