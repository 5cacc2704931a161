//! Population factory

use glam::Vec2;
use rand::Rng;

use super::state::{Player, PlayerKind, World};

/// Spawn `total` players with round-robin kinds, random on-canvas positions
/// and random velocities.
///
/// Position per axis is uniform in `[0, bound - size)` so every sprite starts
/// fully on the canvas. Velocity per axis is uniform in
/// `[-1, speed_factor - 1)`. Spawns may overlap.
///
/// Callers must pass `bounds > entity_size` and a `speed_factor` with
/// `speed_factor - 1 > -1`; `World::new` and `Settings::validate` enforce both.
pub fn create_population<R: Rng + ?Sized>(
    total: u32,
    bounds: Vec2,
    entity_size: Vec2,
    speed_factor: f32,
    rng: &mut R,
) -> Vec<Player> {
    let span = bounds - entity_size;
    let speed_max = speed_factor - 1.0;

    (0..total)
        .map(|index| Player {
            index,
            kind: PlayerKind::from_index(index),
            pos: Vec2::new(rng.random_range(0.0..span.x), rng.random_range(0.0..span.y)),
            vel: Vec2::new(
                rng.random_range(-1.0..speed_max),
                rng.random_range(-1.0..speed_max),
            ),
        })
        .collect()
}

/// Replace the world's players with a fresh population
pub fn populate<R: Rng + ?Sized>(world: &mut World, total: u32, speed_factor: f32, rng: &mut R) {
    world.players = create_population(
        total,
        world.bounds(),
        world.entity_size,
        speed_factor,
        rng,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_population_layout() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Vec2::new(800.0, 600.0);
        let size = Vec2::splat(32.0);
        let players = create_population(45, bounds, size, 2.0, &mut rng);

        assert_eq!(players.len(), 45);
        for (i, p) in players.iter().enumerate() {
            assert_eq!(p.index, i as u32);
            assert_eq!(p.kind, PlayerKind::from_index(i as u32));
            assert!(p.pos.x >= 0.0 && p.pos.x < bounds.x - size.x);
            assert!(p.pos.y >= 0.0 && p.pos.y < bounds.y - size.y);
            assert!(p.vel.x >= -1.0 && p.vel.x < 1.0);
            assert!(p.vel.y >= -1.0 && p.vel.y < 1.0);
        }
    }

    #[test]
    fn test_speed_factor_widens_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        let players = create_population(300, Vec2::splat(500.0), Vec2::splat(32.0), 6.0, &mut rng);
        assert!(players.iter().all(|p| p.vel.x >= -1.0 && p.vel.x < 5.0));
        assert!(players.iter().any(|p| p.vel.x > 1.0));
    }

    #[test]
    fn test_empty_population() {
        let mut rng = Pcg32::seed_from_u64(1);
        let players = create_population(0, Vec2::splat(100.0), Vec2::splat(32.0), 2.0, &mut rng);
        assert!(players.is_empty());
    }

    #[test]
    fn test_populate_replaces_players() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut world = World::new(400.0, 300.0, Vec2::splat(32.0)).unwrap();
        populate(&mut world, 10, 2.0, &mut rng);
        assert_eq!(world.population(), 10);
        populate(&mut world, 4, 2.0, &mut rng);
        assert_eq!(world.population(), 4);
        assert_eq!(world.players()[3].index, 3);
    }
}
