//! Small debugging shell around the decision engine: set up a duel from
//! stdin commands and ask for decisions.

use std::io;
use std::io::prelude::*;

use skirm::config::{BattleConfig, STARTING_ENERGY};
use skirm::evaluation::ScoreWeights;
use skirm::game::{Gamestate, RobotState};
use skirm::search::{Config, Searcher};

fn parse_robot(name: &str, tokens: &[&str]) -> Option<RobotState> {
    let values: Vec<f64> = tokens.iter().filter_map(|token| token.parse().ok()).collect();
    match values[..] {
        [x, y] => Some(RobotState::new(name, STARTING_ENERGY, x, y)),
        [x, y, energy] => Some(RobotState::new(name, energy, x, y)),
        _ => None,
    }
}

fn main() {
    println!("skirm {}", skirm::engine_version());

    let mut battle = BattleConfig::default();
    let mut us = RobotState::new("us", STARTING_ENERGY, battle.width / 4.0, battle.height / 4.0);
    let mut enemy = RobotState::new(
        "enemy",
        STARTING_ENERGY,
        battle.width / 2.0,
        battle.height / 2.0,
    );
    let mut seed = None;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.unwrap();
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["arena", width, height] => {
                match (width.parse(), height.parse()) {
                    (Ok(width), Ok(height)) => battle = BattleConfig::with_arena(width, height),
                    _ => println!("Expected: arena <width> <height>"),
                };
            }
            ["us", rest @ ..] => match parse_robot("us", rest) {
                Some(robot) => us = robot,
                None => println!("Expected: us <x> <y> [energy]"),
            },
            ["enemy", rest @ ..] => match parse_robot("enemy", rest) {
                Some(robot) => enemy = robot,
                None => println!("Expected: enemy <x> <y> [energy]"),
            },
            ["seed", value] => match value.parse() {
                Ok(value) => seed = Some(value),
                Err(e) => println!("Bad seed: {e}"),
            },
            ["d"] => {
                println!("{us}");
                println!("{enemy}");
            }
            ["go"] => {
                let config = Config::default();
                let weights = ScoreWeights::default();
                let mut searcher = match seed {
                    Some(seed) => Searcher::with_seed(config, battle.clone(), weights, seed),
                    None => Searcher::new(config, battle.clone(), weights),
                };
                let root = Gamestate::new(us.clone(), enemy.clone(), Vec::new());
                match searcher.search(root) {
                    Some(decision) => println!(
                        "move {:+.1} turn {:+.1} gun {:+.1} radar {:+.1} fire {:.1} \
                         (score {:.2}, {} iterations, {} nodes)",
                        decision.instructions.move_distance,
                        decision.instructions.robot_degrees,
                        decision.instructions.gun_degrees,
                        decision.instructions.radar_degrees,
                        decision.instructions.fire_power,
                        decision.score,
                        decision.iterations,
                        decision.nodes,
                    ),
                    None => println!("no move available"),
                }
            }
            ["quit"] => break,
            [] => {}
            _ => println!("Unknown command: {line}"),
        }
    }
}
