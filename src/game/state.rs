//! The duel snapshot and the one-tick transition function.

use crate::config::{
    max_body_rotation, BattleConfig, MAX_GUN_ROTATION, MAX_RADAR_ROTATION, MAX_VELOCITY,
};
use crate::game::instructions::{InstructionList, Instructions};
use crate::game::policy;
use crate::game::projectile::Projectile;
use crate::game::robot::{RobotState, RobotStatus};
use crate::geometry;

/// Movement ledger deltas per tick.
const MOVEMENT_ACCELERATE: f64 = 1.0;
const MOVEMENT_DECELERATE: f64 = -0.5;
const MOVEMENT_WALL_STOP: f64 = -1.0;

/// A complete snapshot of the duel at one tick.
///
/// Created exactly once per simulated tick and never mutated afterwards:
/// every transition returns a new `Gamestate`. The instruction that
/// produced the snapshot is kept so the search driver can read the winning
/// first move back out of the chosen root child.
#[derive(Clone, Debug)]
pub struct Gamestate {
    /// The searched robot.
    pub us: RobotState,
    /// The opponent estimate.
    pub enemy: RobotState,
    /// Projectiles in flight. Only active ones are carried over.
    pub projectiles: Vec<Projectile>,
    /// Our instruction that produced this snapshot from its parent, if
    /// any (the root snapshot has none).
    pub instructions: Option<Instructions>,
}

/// Damage bookkeeping for one robot over one tick, produced by the pure
/// partition of the projectile list.
#[derive(Debug, Default)]
struct HitTally {
    damage_taken: f64,
    damage_dealt: f64,
    energy_gain: f64,
}

impl Gamestate {
    /// Creates the root snapshot for a search.
    #[must_use]
    pub fn new(us: RobotState, enemy: RobotState, projectiles: Vec<Projectile>) -> Self {
        Self {
            us,
            enemy,
            projectiles,
            instructions: None,
        }
    }

    /// Legal instructions for the searched robot. Empty when the robot is
    /// disabled or destroyed, which the search treats as a dead end.
    #[must_use]
    pub fn legal_instructions(&self) -> InstructionList {
        legal_instructions_for(&self.us)
    }

    /// Advances the duel by one tick.
    ///
    /// Our side follows `ours`; the opponent follows `enemy` when given
    /// and the heuristic policy otherwise. Both robots and all
    /// projectiles move by one time unit.
    #[must_use]
    pub fn simulate_turn(
        &self,
        ours: &Instructions,
        enemy: Option<&Instructions>,
        config: &BattleConfig,
    ) -> Self {
        let fallback;
        let enemy_instructions = match enemy {
            Some(instructions) => instructions,
            None => {
                fallback = policy::enemy_instructions(self, config);
                &fallback
            }
        };

        // Projectiles fly before anything else this tick; ones that leave
        // the arena are dropped and can no longer hit.
        let advanced: Vec<Projectile> = self
            .projectiles
            .iter()
            .map(|projectile| projectile.advance(config))
            .filter(|projectile| projectile.active)
            .collect();

        let (survivors, our_tally, enemy_tally) = resolve_hits(advanced, self, config);

        let (mut next_us, our_shot) = step_robot(&self.us, ours, &self.enemy, &our_tally, config);
        let (mut next_enemy, enemy_shot) =
            step_robot(&self.enemy, enemy_instructions, &self.us, &enemy_tally, config);

        // Survival bonus lands exactly on the tick the opponent dies while
        // self survives. A mutual kill credits neither side.
        if next_enemy.is_destroyed() && !self.enemy.is_destroyed() && !next_us.is_destroyed() {
            next_us.scores.survival += 1.0;
        }
        if next_us.is_destroyed() && !self.us.is_destroyed() && !next_enemy.is_destroyed() {
            next_enemy.scores.survival += 1.0;
        }

        // Fresh shots join the in-flight list after hit resolution: a
        // bullet cannot connect on its spawn tick.
        let mut projectiles = survivors;
        projectiles.extend(our_shot);
        projectiles.extend(enemy_shot);

        Self {
            us: next_us,
            enemy: next_enemy,
            projectiles,
            instructions: Some(*ours),
        }
    }

    /// Whether the duel is over: either side destroyed.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.us.is_destroyed() || self.enemy.is_destroyed()
    }
}

/// Legal instruction set for a single robot.
#[must_use]
pub fn legal_instructions_for(robot: &RobotState) -> InstructionList {
    if robot.status == RobotStatus::Healthy {
        Instructions::catalog(robot.velocity, robot.can_fire())
    } else {
        InstructionList::new()
    }
}

/// Partitions the advanced projectiles into survivors and consumed hits,
/// tallying damage per robot. Hits are resolved against the robots'
/// pre-move positions; a robot's own bullets pass through it.
fn resolve_hits(
    advanced: Vec<Projectile>,
    state: &Gamestate,
    config: &BattleConfig,
) -> (Vec<Projectile>, HitTally, HitTally) {
    let mut survivors = Vec::with_capacity(advanced.len());
    let mut our_tally = HitTally::default();
    let mut enemy_tally = HitTally::default();

    for projectile in advanced {
        let hits_us =
            projectile.owner != state.us.name && projectile.hits(config, state.us.x, state.us.y);
        let hits_enemy = projectile.owner != state.enemy.name
            && projectile.hits(config, state.enemy.x, state.enemy.y);

        if hits_us {
            our_tally.damage_taken += projectile.damage();
            if projectile.owner == state.enemy.name {
                enemy_tally.damage_dealt += projectile.damage();
                enemy_tally.energy_gain += projectile.energy_return();
            }
        } else if hits_enemy {
            enemy_tally.damage_taken += projectile.damage();
            if projectile.owner == state.us.name {
                our_tally.damage_dealt += projectile.damage();
                our_tally.energy_gain += projectile.energy_return();
            }
        } else {
            survivors.push(projectile);
        }
    }

    (survivors, our_tally, enemy_tally)
}

/// Applies one tick of the transition to a single robot: gun cooling and
/// firing, energy/status resolution, then kinematics.
fn step_robot(
    robot: &RobotState,
    instructions: &Instructions,
    opponent: &RobotState,
    tally: &HitTally,
    config: &BattleConfig,
) -> (RobotState, Option<Projectile>) {
    if robot.is_destroyed() {
        return (robot.clone(), None);
    }
    let mut next = robot.clone();

    // 1. Gun cooling, then firing while the barrel still points where it
    //    did when the instruction was issued.
    next.gun_heat = (next.gun_heat - config.cooling_rate).max(0.0);
    let mut fire_cost = 0.0;
    let shot = if instructions.fire_power > 0.0 && next.can_fire() {
        let projectile = Projectile::new(
            &next.name,
            next.x,
            next.y,
            next.gun_heading,
            instructions.fire_power,
        );
        next.gun_heat += projectile.heat_generated();
        fire_cost = projectile.power;
        next.scores.shoot_attempt += 1.0;
        Some(projectile)
    } else {
        None
    };

    // 2. Damage resolution. Hitting refunds part of the spent energy.
    next.scores.bullet_damage += tally.damage_dealt;
    next.energy = next.energy - fire_cost - tally.damage_taken + tally.energy_gain;

    // 3. Status transition. Damage kills; an empty battery from the
    //    robot's own gun only disables. Destroyed takes precedence.
    if next.energy <= 0.0 {
        next.energy = 0.0;
        next.status = if tally.damage_taken > 0.0 {
            RobotStatus::Destroyed
        } else {
            RobotStatus::Disabled
        };
        if next.is_destroyed() {
            return (next, shot);
        }
    }

    // A disabled robot keeps cooling and keeps taking damage, but it is
    // inert: no actuator responds.
    if robot.status != RobotStatus::Healthy {
        return (next, shot);
    }

    // 4. Headings, bounded per actuator and renormalized.
    let body_limit = max_body_rotation(robot.velocity);
    next.heading = geometry::normalize_degrees(
        next.heading + instructions.robot_degrees.clamp(-body_limit, body_limit),
    );
    next.gun_heading = geometry::normalize_degrees(
        next.gun_heading
            + instructions
                .gun_degrees
                .clamp(-MAX_GUN_ROTATION, MAX_GUN_ROTATION),
    );
    next.radar_heading = geometry::normalize_degrees(
        next.radar_heading
            + instructions
                .radar_degrees
                .clamp(-MAX_RADAR_ROTATION, MAX_RADAR_ROTATION),
    );

    // 5. Velocity.
    let previous_speed = robot.velocity.abs();
    next.velocity = (robot.velocity + instructions.velocity_change).clamp(-MAX_VELOCITY, MAX_VELOCITY);

    // 6. Position, using the new heading and velocity. Clamping to the
    //    arena means a wall collision, which stops the robot dead.
    let (dx, dy) = geometry::degree_to_xy(next.heading, next.velocity);
    let (x, y, hit_wall) = config.clamp_position(next.x + dx, next.y + dy);
    next.x = x;
    next.y = y;

    let at_edge = x <= 0.0 || y <= 0.0 || x >= config.width || y >= config.height;
    if hit_wall {
        next.velocity = 0.0;
        next.scores.movement += MOVEMENT_WALL_STOP;
    } else if next.velocity.abs() > previous_speed {
        next.scores.movement += MOVEMENT_ACCELERATE;
    } else if next.velocity.abs() < previous_speed || (next.velocity == 0.0 && at_edge) {
        next.scores.movement += MOVEMENT_DECELERATE;
    }

    // Aim quality towards the opponent's last known position.
    let target = geometry::xy_to_degree(opponent.x, opponent.y, next.x, next.y);
    let aim_error = geometry::angle_delta(next.gun_heading, target).abs();
    next.scores.gun_direction -= aim_error / 180.0;

    (next, shot)
}
