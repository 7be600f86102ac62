use crate::snake::Position;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

pub const SPECIAL_FOOD_CHANCE: f64 = 0.15;
pub const SPECIAL_FOOD_BONUS: u32 = 5;
pub const SPECIAL_FOOD_LIFETIME: Duration = Duration::from_secs(5);

/// Random samples tried before falling back to scanning the free cells.
const MAX_PLACEMENT_SAMPLES: usize = 64;

/// Picks a random cell not in `excluding`, or `None` if the grid is full.
pub fn place<R: Rng + ?Sized>(grid_size: i16, excluding: &[Position], rng: &mut R) -> Option<Position> {
    for _ in 0..MAX_PLACEMENT_SAMPLES {
        let pos = Position::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !excluding.contains(&pos) {
            return Some(pos);
        }
    }

    tracing::debug!(excluded = excluding.len(), "sampling failed, scanning free cells");
    let free: Vec<Position> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
        .filter(|pos| !excluding.contains(pos))
        .collect();
    free.choose(rng).copied()
}

/// Deadline on the game clock. Owned by the special food it expires, so
/// replacing or eating that food drops the timer with it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ExpiryTimer {
    deadline: Duration,
}

impl ExpiryTimer {
    pub fn schedule(now: Duration, lifetime: Duration) -> Self {
        ExpiryTimer { deadline: now + lifetime }
    }

    pub fn fired(&self, now: Duration) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        self.deadline.saturating_sub(now)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SpecialFood {
    pub pos: Position,
    pub timer: ExpiryTimer,
}

pub struct Food {
    grid_size: i16,
    special_enabled: bool,
    regular: Position,
    special: Option<SpecialFood>,
}

impl Food {
    /// `None` only when the snake already covers every cell.
    pub fn new<R: Rng + ?Sized>(
        grid_size: i16,
        special_enabled: bool,
        snake_body: &[Position],
        rng: &mut R,
    ) -> Option<Self> {
        let regular = place(grid_size, snake_body, rng)?;
        Some(Food {
            grid_size,
            special_enabled,
            regular,
            special: None,
        })
    }

    /// Moves the regular food after it was eaten and rolls once for special
    /// food. If the special food holds the last free cell, the regular food
    /// replaces it. Returns `false` only when the snake covers the board.
    pub fn update<R: Rng + ?Sized>(&mut self, snake_body: &[Position], now: Duration, rng: &mut R) -> bool {
        let mut excluding = snake_body.to_vec();
        if let Some(special) = &self.special {
            excluding.push(special.pos);
        }
        if let Some(pos) = place(self.grid_size, &excluding, rng) {
            self.regular = pos;
            self.try_spawn_special(snake_body, now, rng);
            return true;
        }

        // Only the special food's cell is left.
        match self.special.take() {
            Some(special) => {
                tracing::debug!("special food displaced by regular food");
                self.regular = special.pos;
                true
            }
            None => false,
        }
    }

    fn try_spawn_special<R: Rng + ?Sized>(&mut self, snake_body: &[Position], now: Duration, rng: &mut R) {
        if !self.special_enabled || self.special.is_some() || !rng.gen_bool(SPECIAL_FOOD_CHANCE) {
            return;
        }

        let mut excluding = snake_body.to_vec();
        excluding.push(self.regular);
        if let Some(pos) = place(self.grid_size, &excluding, rng) {
            tracing::debug!(x = pos.x, y = pos.y, "special food spawned");
            self.special = Some(SpecialFood {
                pos,
                timer: ExpiryTimer::schedule(now, SPECIAL_FOOD_LIFETIME),
            });
        }
    }

    /// Clears special food whose timer has fired. No score effect.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.special {
            Some(special) if special.timer.fired(now) => {
                tracing::debug!("special food expired");
                self.special = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear_special(&mut self) {
        self.special = None;
    }

    pub fn set_special_enabled(&mut self, enabled: bool) {
        self.special_enabled = enabled;
        if !enabled {
            self.clear_special();
        }
    }

    pub fn regular(&self) -> Position {
        self.regular
    }

    pub fn special(&self) -> Option<&SpecialFood> {
        self.special.as_ref()
    }

    #[cfg(test)]
    pub fn set_regular(&mut self, pos: Position) {
        self.regular = pos;
    }

    #[cfg(test)]
    pub fn set_special(&mut self, special: Option<SpecialFood>) {
        self.special = special;
    }
}
