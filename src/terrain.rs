//! The lane the runner crosses: one cell per column, obstacle or not.
//!
//! Cells scroll toward index 0 by one every tick. The freshly exposed cell at
//! the back may hold a new obstacle, but never within `cooldown` ticks of the
//! previous one.

use std::collections::VecDeque;

use rand::Rng;

#[derive(Debug, Clone)]
pub struct Terrain {
    cells: VecDeque<bool>,
    spawn_chance: f64,
    cooldown_ticks: u32,
    cooldown: u32,
}

impl Terrain {
    pub fn new(width: usize, spawn_chance: f64, cooldown_ticks: u32) -> Self {
        Self {
            cells: VecDeque::from(vec![false; width]),
            spawn_chance,
            cooldown_ticks,
            cooldown: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether cell `i` holds an obstacle. Out of range reads as empty.
    pub fn occupied(&self, i: usize) -> bool {
        self.cells.get(i).copied().unwrap_or(false)
    }

    pub fn cells(&self) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().copied()
    }

    /// Ticks left before another obstacle may spawn.
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Place or clear an obstacle directly, bypassing the spawner.
    pub fn set(&mut self, i: usize, obstacle: bool) {
        if let Some(cell) = self.cells.get_mut(i) {
            *cell = obstacle;
        }
    }

    /// Scroll one cell and fill the back. Returns whether an obstacle spawned.
    pub fn advance(&mut self, rng: &mut impl Rng) -> bool {
        self.cells.pop_front();
        let spawn = if self.cooldown > 0 {
            self.cooldown -= 1;
            false
        } else if rng.gen_bool(self.spawn_chance) {
            self.cooldown = self.cooldown_ticks;
            true
        } else {
            false
        };
        self.cells.push_back(spawn);
        spawn
    }
}
