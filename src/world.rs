//! One play session's simulation state and the per-tick update.

use std::time::Duration;

use rand::Rng;

use crate::config::Tuning;
use crate::player::Player;
use crate::terrain::Terrain;

#[derive(Debug, Clone)]
pub struct World {
    pub terrain: Terrain,
    pub player: Player,
    pub score: u32,
    pub lives: u32,
    /// Current tick delay in microseconds
    pub delay_us: u64,
    /// Jump requested since the last tick
    pub pending_jump: bool,
    tuning: Tuning,
}

impl World {
    /// `tuning` is expected to have passed [`Tuning::validate`].
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            terrain: Terrain::new(tuning.width, tuning.spawn_chance, tuning.spawn_cooldown),
            player: Player::new(tuning.jump_ticks, tuning.max_jumps),
            score: 0,
            lives: tuning.lives,
            delay_us: tuning.start_delay_us,
            pending_jump: false,
            tuning: tuning.clone(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_micros(self.delay_us)
    }

    pub fn request_jump(&mut self) {
        self.pending_jump = true;
    }

    /// Advance the world by one tick.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        self.terrain.advance(rng);

        if self.terrain.occupied(0) {
            self.score += 1;
        }

        // Ramps on every tick spent at a multiple, zero included.
        if self.score % self.tuning.ramp_every == 0 {
            self.delay_us = self
                .delay_us
                .saturating_sub(self.tuning.delay_step_us)
                .max(self.tuning.min_delay_us);
        }

        let jump = std::mem::take(&mut self.pending_jump);
        self.player.step(jump);
    }

    /// An obstacle under a grounded player.
    pub fn collides(&self) -> bool {
        self.terrain.occupied(self.tuning.player_column) && self.player.is_grounded()
    }

    /// Spend a life. Returns whether any are left.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }

    /// Put the player back on the ground. Terrain, score and speed carry on.
    pub fn respawn(&mut self) {
        self.player.respawn();
        self.pending_jump = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Stance;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn scores_once_per_tick_with_front_obstacle() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut world = World::new(&quiet_tuning());
        world.terrain.set(1, true);
        world.terrain.set(2, true);
        world.terrain.set(5, true);

        let mut scores = Vec::new();
        for _ in 0..6 {
            world.tick(&mut rng);
            scores.push(world.score);
        }
        assert_eq!(scores, vec![1, 2, 2, 2, 3, 3]);
    }

    #[test]
    fn score_never_decreases_and_delay_never_grows() {
        let mut rng = StdRng::seed_from_u64(99);
        let tuning = Tuning::default();
        let mut world = World::new(&tuning);
        let (mut score, mut delay) = (world.score, world.delay_us);
        for _ in 0..5000 {
            world.tick(&mut rng);
            assert!(world.score >= score);
            assert!(world.score - score <= 1);
            assert!(world.delay_us <= delay);
            assert!(world.delay_us >= tuning.min_delay_us);
            score = world.score;
            delay = world.delay_us;
        }
    }

    #[test]
    fn speed_ramps_while_score_sits_on_a_multiple_of_ten() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut world = World::new(&quiet_tuning());
        world.score = 9;
        world.terrain.set(1, true);
        world.tick(&mut rng);
        assert_eq!(world.score, 10);
        assert_eq!(world.delay_us, 138_000);

        // Still on 10: ramps again.
        world.tick(&mut rng);
        assert_eq!(world.delay_us, 136_000);

        // Off a multiple: holds.
        world.terrain.set(1, true);
        world.tick(&mut rng);
        assert_eq!(world.score, 11);
        world.tick(&mut rng);
        assert_eq!(world.delay_us, 136_000);
    }

    #[test]
    fn idle_start_reaches_the_floor_in_forty_ticks() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut world = World::new(&quiet_tuning());
        for tick in 1..=40 {
            world.tick(&mut rng);
            assert_eq!(world.delay_us, 140_000 - 2_000 * tick);
        }
        assert_eq!(world.score, 0);
        assert_eq!(world.delay_us, 60_000);

        world.tick(&mut rng);
        assert_eq!(world.delay_us, 60_000);
    }

    #[test]
    fn delay_is_floored() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut world = World::new(&quiet_tuning());
        world.delay_us = 61_000;
        world.score = 19;
        world.terrain.set(1, true);
        world.tick(&mut rng);
        assert_eq!(world.delay_us, 60_000);
    }

    #[test]
    fn collision_needs_obstacle_and_ground() {
        let mut world = World::new(&quiet_tuning());
        assert!(!world.collides());

        world.terrain.set(1, true);
        assert!(world.collides());

        world.player.stance = Stance::Airborne(2);
        assert!(!world.collides());

        world.terrain.set(1, false);
        world.player.stance = Stance::Grounded;
        world.terrain.set(0, true);
        world.terrain.set(2, true);
        assert!(!world.collides());
    }

    #[test]
    fn pending_jump_is_consumed_by_tick() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut world = World::new(&quiet_tuning());
        world.request_jump();
        world.tick(&mut rng);
        assert!(!world.pending_jump);
        assert_eq!(world.player.stance, Stance::Airborne(4));
    }

    #[test]
    fn respawn_keeps_progress() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut world = World::new(&quiet_tuning());
        world.score = 12;
        world.delay_us = 100_000;
        world.terrain.set(7, true);
        world.request_jump();
        world.tick(&mut rng);
        assert!(world.lose_life());

        world.respawn();
        assert!(world.player.is_grounded());
        assert_eq!(world.player.charges, 0);
        assert_eq!(world.score, 12);
        assert_eq!(world.delay_us, 100_000);
        assert_eq!(world.lives, 2);
        assert!(world.terrain.occupied(6));
    }

    #[test]
    fn last_life_ends_the_run() {
        let mut world = World::new(&quiet_tuning());
        assert!(world.lose_life());
        assert!(world.lose_life());
        assert!(!world.lose_life());
        assert_eq!(world.lives, 0);
    }
}
