//! Match engine: the core of the game.
//!
//! `MatchEngine` owns the hecs ECS world, the destructible terrain and the
//! RNG, processes player commands, runs the turn loop, and produces
//! `MatchSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use barrage_ai::{calculate_shot, HeightProfile, TargetingContext};
use barrage_core::commands::PlayerCommand;
use barrage_core::components::{Aim, Combatant, Health, Projectile};
use barrage_core::config::MatchConfig;
use barrage_core::constants::WIND_MAX;
use barrage_core::enums::{ControlMode, GamePhase, ImpactKind, ShotPhase, WindPolicy};
use barrage_core::error::Result;
use barrage_core::events::SimEvent;
use barrage_core::state::MatchSnapshot;
use barrage_core::types::{CombatantId, Position, SimTime, TurnResult, Velocity};
use barrage_terrain::TerrainField;

use crate::systems;
use crate::systems::ballistics::FlightOutcome;
use crate::turn::TurnState;
use crate::world_setup;

/// The match engine. Owns the ECS world and all match state.
pub struct MatchEngine {
    config: MatchConfig,
    world: World,
    terrain: TerrainField,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    /// Combatant entities, indexed by `CombatantId`.
    roster: Vec<Entity>,
    turn: TurnState,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
}

impl MatchEngine {
    /// Create a match engine in the lobby. Fails if `config` is invalid.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            terrain: TerrainField::empty(config.terrain.width, config.terrain.height),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            roster: Vec::new(),
            turn: TurnState::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the match by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.terrain,
            &self.time,
            self.phase,
            &self.turn,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the terrain.
    pub fn terrain(&self) -> &TerrainField {
        &self.terrain
    }

    /// Get the turn state.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Mutable terrain access (for tests needing a hand-built landscape).
    #[cfg(test)]
    pub fn terrain_mut(&mut self) -> &mut TerrainField {
        &mut self.terrain
    }

    /// Mutable world access (for tests placing combatants directly).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Entity of a combatant by id.
    pub fn combatant_entity(&self, id: CombatantId) -> Option<Entity> {
        self.roster.get(id.0 as usize).copied()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Commands that do not apply now are dropped.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch => {
                if matches!(self.phase, GamePhase::Lobby | GamePhase::MatchOver) {
                    self.start_match();
                } else {
                    tracing::debug!(phase = ?self.phase, "StartMatch ignored");
                }
            }
            PlayerCommand::ReturnToLobby => {
                self.world.clear();
                self.roster.clear();
                self.turn = TurnState::default();
                self.terrain =
                    TerrainField::empty(self.config.terrain.width, self.config.terrain.height);
                self.phase = GamePhase::Lobby;
            }
            PlayerCommand::SetAngle { angle } => {
                if let Some(aim) = self.human_aim() {
                    aim.set_angle(angle);
                }
            }
            PlayerCommand::SetPower { power } => {
                if let Some(aim) = self.human_aim() {
                    aim.set_power(power);
                }
            }
            PlayerCommand::Fire => {
                if let Some(id) = self.current_human() {
                    self.fire(id);
                } else {
                    tracing::debug!("Fire ignored: not a human turn or shot already taken");
                }
            }
            PlayerCommand::SetDifficulty {
                combatant,
                difficulty,
            } => {
                for (_entity, c) in self.world.query_mut::<&mut Combatant>() {
                    if c.id != combatant {
                        continue;
                    }
                    match &mut c.control {
                        ControlMode::Ai { difficulty: d } => *d = difficulty,
                        ControlMode::Human => {
                            tracing::debug!(%combatant, "SetDifficulty ignored: human combatant")
                        }
                    }
                }
            }
            PlayerCommand::SetWind { wind } => {
                if self.phase == GamePhase::Active && self.turn.shot_phase != ShotPhase::Flight {
                    self.turn.wind = clamp_wind(wind);
                } else {
                    tracing::debug!("SetWind ignored: no turn open or shell in flight");
                }
            }
        }
    }

    /// Generate terrain, place the roster, and open the first turn.
    fn start_match(&mut self) {
        self.world.clear();
        self.terrain = barrage_terrain::generate(&self.config.terrain, &mut self.rng);
        self.roster =
            world_setup::spawn_roster(&mut self.world, &self.terrain, &self.config.roster);
        self.turn = TurnState::default();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;

        tracing::info!(
            seed = self.config.seed,
            combatants = self.roster.len(),
            "match started"
        );
        self.events.push(SimEvent::MatchStarted {
            seed: self.config.seed,
        });
        self.begin_turn(CombatantId(0));
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Drop combatants onto eroded ground
        systems::settle::run(&mut self.world, &self.terrain);

        // 2. Advance the shot state machine
        match self.turn.shot_phase {
            ShotPhase::Idle => self.run_idle(),
            ShotPhase::Flight => self.run_flight(),
            ShotPhase::Exploding | ShotPhase::OutOfBounds => self.finish_turn(),
        }
    }

    /// Count think time for AI combatants and fire once it elapses.
    fn run_idle(&mut self) {
        let Some(id) = self.turn.current else {
            return;
        };
        let Some(ControlMode::Ai { difficulty }) = self.control_of(id) else {
            return;
        };
        if self.turn.idle_ticks < self.config.ai_think_ticks {
            self.turn.idle_ticks += 1;
            return;
        }

        let Some(shooter) = self.position_of(id) else {
            return;
        };
        let Some(target) = self.next_opponent(id).and_then(|t| self.position_of(t)) else {
            return;
        };

        let ctx = TargetingContext {
            shooter,
            target,
            wind: self.turn.wind,
            terrain: HeightProfile::new(
                self.terrain.height_map(),
                self.terrain.width(),
                self.terrain.height(),
            ),
        };
        let shot = calculate_shot(&ctx, difficulty, &mut self.rng);

        if let Some(entity) = self.combatant_entity(id) {
            if let Ok(aim) = self.world.query_one_mut::<&mut Aim>(entity) {
                *aim = Aim::from(shot);
            }
        }
        self.fire(id);
    }

    /// Step the shell and resolve whatever it ran into.
    fn run_flight(&mut self) {
        let Some(shell) = self.turn.projectile else {
            self.turn.shot_phase = ShotPhase::Idle;
            return;
        };

        match systems::ballistics::run(&mut self.world, &self.terrain, shell, self.turn.wind) {
            FlightOutcome::InFlight => {}
            FlightOutcome::Impact { point, struck } => {
                let shooter = self.despawn_shell(shell).map(|p| p.shooter);
                let Some(shooter) = shooter else {
                    return;
                };
                self.events.push(SimEvent::Impact {
                    point: Position(point),
                    struck,
                });
                if let ImpactKind::Combatant { id } = struck {
                    tracing::debug!(%shooter, target = %id, "direct hit");
                }

                let blast = systems::explosion::resolve(
                    &mut self.world,
                    &mut self.terrain,
                    point,
                    shooter,
                    &mut self.rng,
                );
                self.events.push(SimEvent::TerrainChanged {
                    revision: self.terrain.revision(),
                    cells_cleared: blast.cells_cleared,
                });
                for combatant in &blast.destroyed {
                    tracing::info!(%combatant, "combatant destroyed");
                    self.events.push(SimEvent::CombatantDestroyed {
                        combatant: *combatant,
                    });
                }
                self.events.push(SimEvent::ExplosionResolved {
                    point: Position(point),
                    result: blast.result.clone(),
                });
                self.turn.last_result = Some(blast.result);
                self.turn.shot_phase = ShotPhase::Exploding;
            }
            FlightOutcome::OutOfBounds => {
                let Some(projectile) = self.despawn_shell(shell) else {
                    return;
                };
                let result = TurnResult::miss(projectile.shooter, projectile.closest_approach);
                tracing::debug!(shooter = %projectile.shooter, "shot left the world");
                self.events.push(SimEvent::ShotOutOfBounds {
                    result: result.clone(),
                });
                self.turn.last_result = Some(result);
                self.turn.shot_phase = ShotPhase::OutOfBounds;
            }
        }
    }

    /// Launch a shell from combatant `id` with its current aim.
    fn fire(&mut self, id: CombatantId) {
        let Some(entity) = self.combatant_entity(id) else {
            return;
        };
        let Some((shell, state)) = systems::ballistics::fire(&mut self.world, entity) else {
            return;
        };
        self.turn.projectile = Some(shell);
        self.turn.shot_phase = ShotPhase::Flight;
        self.events.push(SimEvent::ShotFired {
            shooter: id,
            origin: Position(state.position),
            velocity: Velocity(state.velocity),
        });
    }

    fn despawn_shell(&mut self, shell: Entity) -> Option<Projectile> {
        self.turn.projectile = None;
        let projectile = self.world.remove_one::<Projectile>(shell).ok();
        if self.world.despawn(shell).is_err() {
            tracing::debug!(?shell, "shell entity already gone");
        }
        projectile
    }

    /// Close the turn: end the match or hand over to the next living combatant.
    fn finish_turn(&mut self) {
        self.turn.turn_count += 1;
        self.turn.shot_phase = ShotPhase::Idle;

        let alive = self.living();
        if alive.len() <= 1 {
            let winner = alive.first().copied();
            self.phase = GamePhase::MatchOver;
            self.turn.current = None;
            self.turn.winner = winner;
            tracing::info!(?winner, turns = self.turn.turn_count, "match over");
            self.events.push(SimEvent::MatchOver {
                winner,
                turns: self.turn.turn_count,
            });
            return;
        }

        let next = self
            .turn
            .current
            .and_then(|id| self.next_opponent(id))
            .unwrap_or(alive[0]);
        self.begin_turn(next);
    }

    fn begin_turn(&mut self, id: CombatantId) {
        self.turn.current = Some(id);
        self.turn.idle_ticks = 0;
        self.turn.wind = match self.config.wind {
            WindPolicy::Random => self.rng.gen_range(-WIND_MAX..=WIND_MAX),
            WindPolicy::Fixed { wind } => clamp_wind(wind),
        };
        tracing::debug!(combatant = %id, wind = self.turn.wind, "turn started");
        self.events.push(SimEvent::TurnStarted {
            combatant: id,
            wind: self.turn.wind,
            turn: self.turn.turn_count,
        });
    }

    /// Ids of living combatants, in roster order.
    fn living(&self) -> Vec<CombatantId> {
        systems::ballistics::living_targets(&self.world)
            .into_iter()
            .map(|(id, _)| id)
            .collect()
    }

    /// First living combatant after `id` in roster order, wrapping around.
    fn next_opponent(&self, id: CombatantId) -> Option<CombatantId> {
        let alive = self.living();
        alive
            .iter()
            .find(|other| **other > id)
            .or_else(|| alive.iter().find(|other| **other != id))
            .copied()
    }

    fn control_of(&self, id: CombatantId) -> Option<ControlMode> {
        let entity = self.combatant_entity(id)?;
        let combatant = self.world.get::<&Combatant>(entity).ok()?;
        Some(combatant.control)
    }

    fn position_of(&self, id: CombatantId) -> Option<DVec2> {
        let entity = self.combatant_entity(id)?;
        let pos = self.world.get::<&Position>(entity).ok()?;
        Some(pos.0)
    }

    /// The current combatant's id if it is human, alive, and yet to fire.
    fn current_human(&self) -> Option<CombatantId> {
        if self.phase != GamePhase::Active || !self.turn.awaiting_shot() {
            return None;
        }
        let id = self.turn.current?;
        let entity = self.combatant_entity(id)?;
        let alive = self
            .world
            .get::<&Health>(entity)
            .map(|h| h.alive)
            .unwrap_or(false);
        (alive && self.control_of(id).is_some_and(|c| !c.is_ai())).then_some(id)
    }

    /// Aim of the current human combatant, if aiming is allowed right now.
    fn human_aim(&mut self) -> Option<&mut Aim> {
        let id = self.current_human()?;
        let entity = self.combatant_entity(id)?;
        self.world.query_one_mut::<&mut Aim>(entity).ok()
    }
}

fn clamp_wind(wind: f64) -> f64 {
    if wind.is_nan() {
        return 0.0;
    }
    wind.clamp(-WIND_MAX, WIND_MAX)
}
