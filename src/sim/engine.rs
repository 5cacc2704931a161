//! Simulation engine
//!
//! Owns the world, the RNG and the run state. The driver is the only thing
//! that mutates it; everybody else reads counts, winner and the paused flag
//! through the publisher or a `StateSnapshot`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::publish::StatePublisher;
use super::spawn::populate;
use super::state::{GamePhase, PlayerKind, PopulationCounts, World};
use super::tally::Verdict;
use super::tick::{Rules, TickReport, step_world};
use crate::error::SimError;
use crate::settings::Settings;

/// Read-only view of the run, safe to hand to the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub phase: GamePhase,
    pub paused: bool,
    pub winner: Option<PlayerKind>,
    pub counts: PopulationCounts,
    pub population: u32,
    pub ticks: u64,
}

pub struct Engine {
    settings: Settings,
    world: World,
    rng: Pcg32,
    phase: GamePhase,
    counts: PopulationCounts,
    winner: Option<PlayerKind>,
    ticks: u64,
    publisher: StatePublisher,
}

impl Engine {
    /// Build a world of the given size and spawn the initial population
    pub fn new(settings: Settings, width: f32, height: f32) -> Result<Self, SimError> {
        settings.validate()?;
        let world = World::new(width, height, settings.player_size())?;
        let mut engine = Self::with_world(settings, world);
        engine.respawn();
        log::info!(
            "Engine ready: {} players on {}x{}",
            engine.world.population(),
            width,
            height
        );
        Ok(engine)
    }

    /// Start from an existing world instead of a random spawn. A later
    /// `restart` still respawns from `settings`.
    pub fn from_world(settings: Settings, world: World) -> Result<Self, SimError> {
        settings.validate()?;
        world.validate()?;
        let mut engine = Self::with_world(settings, world);
        engine.reset_run_state();
        Ok(engine)
    }

    fn with_world(settings: Settings, world: World) -> Self {
        let rng = match settings.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        Self {
            settings,
            world,
            rng,
            phase: GamePhase::Running,
            counts: PopulationCounts::default(),
            winner: None,
            ticks: 0,
            publisher: StatePublisher::new(),
        }
    }

    fn rules(&self) -> Rules {
        Rules {
            collision: self.settings.collision_policy,
            boundary: self.settings.boundary_policy,
        }
    }

    fn respawn(&mut self) {
        populate(
            &mut self.world,
            self.settings.players_total,
            self.settings.speed_factor,
            &mut self.rng,
        );
        self.reset_run_state();
    }

    /// Running, no winner, counts taken from the current population
    fn reset_run_state(&mut self) {
        self.phase = GamePhase::Running;
        self.winner = None;
        self.ticks = 0;
        self.counts = PopulationCounts::tally(self.world.players());

        self.publisher.publish_counts(self.counts);
        self.publisher.publish_winner(None);
        self.publisher.publish_paused(false);
    }

    /// Advance one tick. Returns `None` without touching the world when
    /// paused or won.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.phase != GamePhase::Running {
            return None;
        }

        self.ticks += 1;
        let rules = self.rules();
        let report = step_world(&mut self.world, rules, self.ticks);

        self.counts = report.counts;
        self.publisher.publish_counts(report.counts);

        if let Verdict::Won(kind) = report.verdict {
            self.winner = Some(kind);
            self.phase = GamePhase::Won;
            self.publisher.publish_winner(Some(kind));
            log::info!("{} wins after {} ticks", kind.as_str(), self.ticks);
        }

        Some(report)
    }

    /// Discard the population and spawn a fresh one
    pub fn restart(&mut self) {
        self.respawn();
        log::info!("Restarted with {} players", self.world.population());
    }

    /// Flip between running and paused. Rejected once a winner exists.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::Won => {
                log::debug!("Pause toggle ignored: game already won");
                return false;
            }
        };
        let paused = self.phase == GamePhase::Paused;
        self.publisher.publish_paused(paused);
        log::debug!("Paused: {}", paused);
        true
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn winner(&self) -> Option<PlayerKind> {
        self.winner
    }

    pub fn counts(&self) -> PopulationCounts {
        self.counts
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn publisher(&self) -> &StatePublisher {
        &self.publisher
    }

    /// Subscriptions need mutable access
    pub fn publisher_mut(&mut self) -> &mut StatePublisher {
        &mut self.publisher
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            phase: self.phase,
            paused: self.is_paused(),
            winner: self.winner,
            counts: self.counts,
            population: self.world.population(),
            ticks: self.ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn seeded(total: u32) -> Settings {
        Settings {
            players_total: total,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_spawns_and_publishes() {
        let engine = Engine::new(seeded(45), 800.0, 600.0).unwrap();
        assert_eq!(engine.world().population(), 45);
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(
            engine.counts(),
            PopulationCounts { rock: 15, paper: 15, scissors: 15 }
        );
        assert_eq!(engine.publisher().counts(), engine.counts());
        assert_eq!(engine.publisher().winner(), None);
    }

    #[test]
    fn test_new_rejects_bad_bounds() {
        assert!(matches!(
            Engine::new(seeded(3), 0.0, 600.0),
            Err(SimError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Engine::new(seeded(3), 800.0, -5.0),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_from_world_rechecks_world() {
        let player = |index| crate::sim::state::Player {
            index,
            kind: PlayerKind::Rock,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
        };
        let world = World {
            width: -5.0,
            height: 0.0,
            entity_size: Vec2::splat(32.0),
            players: vec![player(0)],
        };
        assert!(matches!(
            Engine::from_world(seeded(3), world),
            Err(SimError::InvalidConfiguration(_))
        ));

        let world = World {
            width: 400.0,
            height: 400.0,
            entity_size: Vec2::splat(32.0),
            players: vec![player(7), player(7)],
        };
        assert!(matches!(
            Engine::from_world(seeded(3), world),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_new_rejects_tiny_speed_factor() {
        let settings = Settings {
            speed_factor: 1e-9,
            ..seeded(9)
        };
        assert!(matches!(
            Engine::new(settings, 800.0, 600.0),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut engine = Engine::new(seeded(30), 640.0, 480.0).unwrap();
        engine.tick();
        assert!(engine.toggle_pause());
        assert!(engine.publisher().paused());

        let frozen = engine.world().players().to_vec();
        let counts = engine.counts();
        for _ in 0..100 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.world().players(), frozen.as_slice());
        assert_eq!(engine.counts(), counts);

        assert!(engine.toggle_pause());
        assert!(!engine.publisher().paused());
        let report = engine.tick().unwrap();
        assert_eq!(report.tick, 2);
        // Resumed from the frozen positions, no reset
        for (moved, before) in engine.world().players().iter().zip(&frozen) {
            assert_eq!(moved.index, before.index);
            assert_eq!(moved.pos, before.pos + before.vel);
        }
    }

    #[test]
    fn test_win_is_terminal_until_restart() {
        let world = World::from_layout(
            300.0,
            300.0,
            Vec2::splat(32.0),
            (0..4).map(|i| (PlayerKind::Rock, Vec2::new(i as f32 * 50.0, 0.0), Vec2::ONE)),
        )
        .unwrap();
        let mut engine = Engine::from_world(seeded(9), world).unwrap();

        let report = engine.tick().unwrap();
        assert_eq!(report.verdict, Verdict::Won(PlayerKind::Rock));
        assert_eq!(engine.phase(), GamePhase::Won);
        assert_eq!(engine.winner(), Some(PlayerKind::Rock));
        assert_eq!(engine.publisher().winner(), Some(PlayerKind::Rock));

        assert!(engine.tick().is_none());
        assert!(!engine.toggle_pause());
        assert_eq!(engine.phase(), GamePhase::Won);

        engine.restart();
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.winner(), None);
        assert_eq!(engine.publisher().winner(), None);
        assert_eq!(engine.counts(), PopulationCounts { rock: 3, paper: 3, scissors: 3 });
        assert_eq!(engine.ticks(), 0);
    }

    #[test]
    fn test_restart_clears_pause() {
        let mut engine = Engine::new(seeded(6), 400.0, 400.0).unwrap();
        engine.toggle_pause();
        engine.restart();
        assert!(!engine.is_paused());
        assert!(!engine.publisher().paused());
        assert!(engine.tick().is_some());
    }

    #[test]
    fn test_empty_population_runs_forever() {
        let mut engine = Engine::new(seeded(0), 400.0, 400.0).unwrap();
        for _ in 0..50 {
            let report = engine.tick().unwrap();
            assert_eq!(report.verdict, Verdict::Running);
        }
        assert_eq!(engine.counts(), PopulationCounts::default());
        assert_eq!(engine.winner(), None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let engine = Engine::new(seeded(3), 400.0, 400.0).unwrap();
        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        let back: StateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, engine.snapshot());
        assert!(json.contains("\"phase\":\"Running\""));
    }
}
