use crate::config::{GameConfig, SpeedPreset};
use crate::food::{Food, SPECIAL_FOOD_BONUS};
use crate::score::HighScore;
use crate::snake::{Direction, Snake};
use crate::storage::Storage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[cfg(test)]
mod tests;

/// Ticks allowed to run in one `update`; surplus time after a long frame is dropped.
const MAX_TICKS_PER_UPDATE: u32 = 5;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GameState {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Everything the player can ask for. Commands that don't apply to the
/// current state are ignored.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Start,
    Restart,
    BackToTitle,
    ToggleSettings,
    SetSpeed(SpeedPreset),
    CycleTheme,
    ToggleGridLines,
    ToggleSpecialFood,
    ToggleAudio,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GameEvent {
    AteFood,
    AteSpecialFood,
    SpecialExpired,
    GameOver { score: u32, new_high_score: bool, won: bool },
}

pub struct Game {
    state: GameState,
    settings_open: bool,
    config: GameConfig,
    snake: Snake,
    food: Option<Food>,
    score: u32,
    high_score: HighScore,
    new_high_score: bool,
    won: bool,
    clock: Duration,
    accumulator: Duration,
    storage: Box<dyn Storage>,
    rng: StdRng,
}

impl Game {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self::with_rng(storage, StdRng::from_entropy())
    }

    pub fn with_rng(storage: Box<dyn Storage>, rng: StdRng) -> Self {
        let config = GameConfig::load(storage.as_ref());
        let high_score = HighScore::load(storage.as_ref());
        tracing::info!(?config, high_score = high_score.score, "loaded settings");

        Game {
            state: GameState::Idle,
            settings_open: false,
            snake: Snake::new(config.grid_size),
            food: None,
            score: 0,
            high_score,
            new_high_score: false,
            won: false,
            clock: Duration::ZERO,
            accumulator: Duration::ZERO,
            config,
            storage,
            rng,
        }
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Turn(dir) => {
                if matches!(self.state, GameState::Running | GameState::Paused) {
                    self.snake.change_direction(dir);
                }
            }
            Command::TogglePause => match self.state {
                GameState::Running => self.set_state(GameState::Paused),
                GameState::Paused => self.set_state(GameState::Running),
                _ => {}
            },
            Command::Start if self.state == GameState::Idle => self.start(),
            Command::Restart if self.state == GameState::GameOver => self.start(),
            Command::Start | Command::Restart => {}
            Command::BackToTitle => {
                if self.state == GameState::GameOver {
                    self.set_state(GameState::Idle);
                }
            }
            Command::ToggleSettings => self.toggle_settings(),
            Command::SetSpeed(preset) => {
                self.config.set_speed(preset);
                // The next tick is a full new interval away.
                self.accumulator = Duration::ZERO;
                self.save_config();
            }
            Command::CycleTheme => {
                self.config.theme = self.config.theme.next();
                self.save_config();
            }
            Command::ToggleGridLines => {
                self.config.grid_lines = !self.config.grid_lines;
                self.save_config();
            }
            Command::ToggleSpecialFood => {
                self.config.special_food_enabled = !self.config.special_food_enabled;
                if let Some(food) = &mut self.food {
                    food.set_special_enabled(self.config.special_food_enabled);
                }
                self.save_config();
            }
            Command::ToggleAudio => {
                self.config.sound_enabled = !self.config.sound_enabled;
                self.save_config();
            }
        }
    }

    /// Feeds elapsed wall time to the tick schedule. Only the running state
    /// advances the clock, so pausing also freezes special food expiry.
    pub fn update(&mut self, dt: Duration) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Running {
            return events;
        }

        self.clock += dt;
        if let Some(food) = &mut self.food {
            if food.expire(self.clock) {
                events.push(GameEvent::SpecialExpired);
            }
        }

        let interval = self.config.tick_interval();
        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= interval && self.state == GameState::Running {
            if ticks == MAX_TICKS_PER_UPDATE {
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= interval;
            events.extend(self.tick());
            ticks += 1;
        }
        events
    }

    /// One simulation step: move, collide, eat.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.state != GameState::Running {
            return events;
        }

        self.snake.advance();
        if self.snake.detect_collision(self.config.grid_size) {
            events.push(self.game_over(false));
            return events;
        }

        let food = match &mut self.food {
            Some(food) => food,
            None => return events,
        };

        if self.snake.head_at(food.regular()) {
            self.snake.grow();
            self.score += 1;
            events.push(GameEvent::AteFood);
            if !food.update(self.snake.body(), self.clock, &mut self.rng) {
                events.push(self.game_over(true));
                return events;
            }
        }

        if let Some(special) = food.special() {
            if self.snake.head_at(special.pos) {
                self.snake.grow();
                self.score += SPECIAL_FOOD_BONUS;
                food.clear_special();
                events.push(GameEvent::AteSpecialFood);
            }
        }

        events
    }

    fn start(&mut self) {
        self.snake.reset(self.config.grid_size);
        self.food = Food::new(
            self.config.grid_size,
            self.config.special_food_enabled,
            self.snake.body(),
            &mut self.rng,
        );
        self.score = 0;
        self.new_high_score = false;
        self.won = false;
        self.clock = Duration::ZERO;
        self.accumulator = Duration::ZERO;
        self.set_state(GameState::Running);
    }

    fn game_over(&mut self, won: bool) -> GameEvent {
        self.won = won;
        self.set_state(GameState::GameOver);
        let new_high_score = self.high_score.record(self.score, self.storage.as_mut());
        self.new_high_score = new_high_score;
        if new_high_score {
            tracing::info!(score = self.score, "new high score");
        }
        GameEvent::GameOver {
            score: self.score,
            new_high_score,
            won,
        }
    }

    fn toggle_settings(&mut self) {
        self.settings_open = !self.settings_open;
        match (self.settings_open, self.state) {
            (true, GameState::Running) => self.set_state(GameState::Paused),
            (false, GameState::Paused) => self.set_state(GameState::Running),
            _ => {}
        }
    }

    fn set_state(&mut self, state: GameState) {
        tracing::info!(from = ?self.state, to = ?state, score = self.score, "state change");
        self.state = state;
    }

    fn save_config(&mut self) {
        tracing::debug!(config = ?self.config, "settings changed");
        self.config.save(self.storage.as_mut());
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    /// Whether the game that just ended beat the stored record.
    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }
}
