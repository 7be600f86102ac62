use crate::config::SpeedPreset;
use crate::game::{Command, Game, GameEvent, GameState};
use crate::render;
use crate::snake::Direction;
use ggez::audio::{self, SoundSource};
use ggez::event::EventHandler;
use ggez::graphics;
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::{Context, GameResult};

/// Window-side shell around `Game`: frame timing, keys, drawing, sound.
pub struct App {
    game: Game,
    eat_sound: Option<audio::Source>,
    game_over_sound: Option<audio::Source>,
}

impl App {
    pub fn new(ctx: &mut Context, game: Game) -> Self {
        App {
            game,
            eat_sound: load_sound(ctx, "/eat.wav"),
            game_over_sound: load_sound(ctx, "/game_over.wav"),
        }
    }

    fn play(&mut self, ctx: &mut Context, event: GameEvent) -> GameResult {
        if !self.game.config().sound_enabled {
            return Ok(());
        }
        let sound = match event {
            GameEvent::AteFood | GameEvent::AteSpecialFood => self.eat_sound.as_mut(),
            GameEvent::GameOver { .. } => self.game_over_sound.as_mut(),
            GameEvent::SpecialExpired => None,
        };
        if let Some(sound) = sound {
            sound.play_detached(ctx)?;
        }
        Ok(())
    }
}

fn load_sound(ctx: &mut Context, path: &str) -> Option<audio::Source> {
    match audio::Source::new(ctx, path) {
        Ok(source) => Some(source),
        Err(e) => {
            tracing::warn!(path, error = %e, "sound unavailable");
            None
        }
    }
}

/// Maps a key to the command it means in `state`.
pub fn command_for(key: KeyCode, state: GameState) -> Option<Command> {
    let command = match key {
        KeyCode::Up | KeyCode::W => Command::Turn(Direction::Up),
        KeyCode::Down | KeyCode::S => Command::Turn(Direction::Down),
        KeyCode::Left | KeyCode::A => Command::Turn(Direction::Left),
        KeyCode::Right | KeyCode::D => Command::Turn(Direction::Right),
        KeyCode::Space | KeyCode::Escape => Command::TogglePause,
        KeyCode::Return => match state {
            GameState::GameOver => Command::Restart,
            _ => Command::Start,
        },
        KeyCode::Back => Command::BackToTitle,
        KeyCode::Tab => Command::ToggleSettings,
        KeyCode::Key1 => Command::SetSpeed(SpeedPreset::Slow),
        KeyCode::Key2 => Command::SetSpeed(SpeedPreset::Medium),
        KeyCode::Key3 => Command::SetSpeed(SpeedPreset::Fast),
        KeyCode::T => Command::CycleTheme,
        KeyCode::G => Command::ToggleGridLines,
        KeyCode::F => Command::ToggleSpecialFood,
        KeyCode::M => Command::ToggleAudio,
        _ => return None,
    };
    Some(command)
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let dt = ctx.time.delta();
        for event in self.game.update(dt) {
            self.play(ctx, event)?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let palette = self.game.config().apply_theme();
        let mut canvas = graphics::Canvas::from_frame(ctx, palette.background);
        render::draw(ctx, &mut canvas, &self.game, &palette)?;
        canvas.finish(ctx)?;
        Ok(())
    }

    fn key_down_event(&mut self, ctx: &mut Context, input: KeyInput, _repeat: bool) -> GameResult {
        let keycode = match input.keycode {
            Some(keycode) => keycode,
            None => return Ok(()),
        };

        let state = self.game.state();
        if keycode == KeyCode::Q && matches!(state, GameState::Idle | GameState::GameOver) {
            ctx.request_quit();
            return Ok(());
        }
        if let Some(command) = command_for(keycode, state) {
            tracing::trace!(?command, "input");
            self.game.handle(command);
        }
        Ok(())
    }
}
