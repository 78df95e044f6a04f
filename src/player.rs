//! The runner's vertical state and jump charges.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Grounded,
    /// Ticks left before landing. `Airborne(0)` is still drawn in the air and
    /// lands on the following tick.
    Airborne(u32),
}

#[derive(Debug, Clone)]
pub struct Player {
    pub stance: Stance,
    /// Jumps started since the last landing
    pub charges: u32,
    jump_ticks: u32,
    max_jumps: u32,
}

impl Player {
    pub fn new(jump_ticks: u32, max_jumps: u32) -> Self {
        Self {
            stance: Stance::Grounded,
            charges: 0,
            jump_ticks,
            max_jumps,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.stance == Stance::Grounded
    }

    pub fn can_jump(&self) -> bool {
        self.charges < self.max_jumps
    }

    /// Advance the jump state by one tick. A pending jump with a charge left
    /// (re)starts the air time; otherwise the current arc runs down.
    pub fn step(&mut self, jump: bool) {
        if jump && self.can_jump() {
            self.stance = Stance::Airborne(self.jump_ticks);
            self.charges += 1;
            return;
        }
        self.stance = match self.stance {
            Stance::Airborne(n) if n > 0 => Stance::Airborne(n - 1),
            Stance::Airborne(_) | Stance::Grounded => Stance::Grounded,
        };
        if self.is_grounded() {
            self.charges = 0;
        }
    }

    /// Back on the ground with all charges, as after losing a life.
    pub fn respawn(&mut self) {
        self.stance = Stance::Grounded;
        self.charges = 0;
    }
}
