//! Population aggregation and the termination check

use super::state::{Player, PlayerKind, PopulationCounts};

/// What the aggregation step decided for the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Keep ticking
    Running,
    /// Paused; counts are frozen
    Paused,
    /// `kind` owns the whole population
    Won(PlayerKind),
}

/// Termination check. Order matters only for the paused case:
/// paused, then rock, scissors, paper, else running.
///
/// An empty population never produces a winner. `Engine::tick` never steps a
/// paused world, so the tick path always evaluates with `paused = false`.
pub fn evaluate(counts: &PopulationCounts, total: u32, paused: bool) -> Verdict {
    if paused {
        return Verdict::Paused;
    }
    if total == 0 {
        return Verdict::Running;
    }

    [PlayerKind::Rock, PlayerKind::Scissors, PlayerKind::Paper]
        .into_iter()
        .find(|&kind| counts.get(kind) == total)
        .map_or(Verdict::Running, Verdict::Won)
}

/// Recount the population and evaluate it
pub fn aggregate(players: &[Player], paused: bool) -> (PopulationCounts, Verdict) {
    let counts = PopulationCounts::tally(players);
    let verdict = evaluate(&counts, players.len() as u32, paused);
    (counts, verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(rock: u32, paper: u32, scissors: u32) -> PopulationCounts {
        PopulationCounts { rock, paper, scissors }
    }

    #[test]
    fn test_running_while_mixed() {
        assert_eq!(evaluate(&counts(15, 15, 15), 45, false), Verdict::Running);
        assert_eq!(evaluate(&counts(44, 1, 0), 45, false), Verdict::Running);
    }

    #[test]
    fn test_each_kind_can_win() {
        assert_eq!(evaluate(&counts(9, 0, 0), 9, false), Verdict::Won(PlayerKind::Rock));
        assert_eq!(evaluate(&counts(0, 9, 0), 9, false), Verdict::Won(PlayerKind::Paper));
        assert_eq!(evaluate(&counts(0, 0, 9), 9, false), Verdict::Won(PlayerKind::Scissors));
    }

    #[test]
    fn test_paused_checked_first() {
        assert_eq!(evaluate(&counts(9, 0, 0), 9, true), Verdict::Paused);
    }

    #[test]
    fn test_empty_population_never_wins() {
        assert_eq!(evaluate(&counts(0, 0, 0), 0, false), Verdict::Running);
    }

    #[test]
    fn test_aggregate_rescans() {
        use crate::sim::state::World;
        use glam::Vec2;

        let world = World::from_layout(
            100.0,
            100.0,
            Vec2::splat(8.0),
            (0..4).map(|_| (PlayerKind::Paper, Vec2::ZERO, Vec2::ZERO)),
        )
        .unwrap();
        let (c, verdict) = aggregate(world.players(), false);
        assert_eq!(c, counts(0, 4, 0));
        assert_eq!(verdict, Verdict::Won(PlayerKind::Paper));
    }
}
