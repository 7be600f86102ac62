use super::*;
use crate::config::CONFIG_KEY;
use crate::food::{ExpiryTimer, SpecialFood, SPECIAL_FOOD_LIFETIME};
use crate::score::HIGH_SCORE_KEY;
use crate::snake::Position;
use crate::storage::MemoryStorage;

fn make_game() -> Game {
    Game::with_rng(Box::new(MemoryStorage::new()), StdRng::seed_from_u64(42))
}

fn running_game() -> Game {
    let mut game = make_game();
    game.handle(Command::Start);
    assert_eq!(game.state(), GameState::Running);
    game
}

fn food_mut(game: &mut Game) -> &mut Food {
    game.food.as_mut().unwrap()
}

/// Puts the regular food somewhere the snake won't reach in a few ticks.
fn park_food(game: &mut Game) {
    food_mut(game).set_regular(Position::new(0, 0));
}

fn special_at(pos: Position, now: Duration) -> SpecialFood {
    SpecialFood {
        pos,
        timer: ExpiryTimer::schedule(now, SPECIAL_FOOD_LIFETIME),
    }
}

fn interval(game: &Game) -> Duration {
    game.config().tick_interval()
}

/// Runs ticks until the snake hits the right wall.
fn crash(game: &mut Game) -> Vec<GameEvent> {
    park_food(game);
    for _ in 0..game.config().grid_size {
        let events = game.tick();
        if game.state() == GameState::GameOver {
            return events;
        }
    }
    panic!("snake never crashed");
}

#[test]
fn starts_idle_with_defaults() {
    let game = make_game();
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.score(), 0);
    assert!(game.food().is_none());
    assert_eq!(game.config().grid_size, 20);
}

#[test]
fn start_resets_entities() {
    let game = running_game();
    let food = game.food().unwrap();
    assert_eq!(game.snake().len(), 3);
    assert_eq!(game.snake().head(), Position::new(10, 10));
    assert!(!game.snake().body().contains(&food.regular()));
    assert!(food.special().is_none());
}

#[test]
fn idle_ignores_everything_but_start_and_settings() {
    let mut game = make_game();
    game.handle(Command::Turn(Direction::Up));
    game.handle(Command::TogglePause);
    game.handle(Command::Restart);
    game.handle(Command::BackToTitle);
    assert_eq!(game.state(), GameState::Idle);
    assert_eq!(game.snake().next_direction(), Direction::Right);
    assert!(game.tick().is_empty());
    assert!(game.update(Duration::from_secs(1)).is_empty());
}

#[test]
fn tick_moves_snake_one_cell() {
    let mut game = running_game();
    park_food(&mut game);
    game.tick();
    let body = game.snake().body();
    assert_eq!(body, &[Position::new(11, 10), Position::new(10, 10), Position::new(9, 10)]);
}

#[test]
fn reversal_command_is_dropped() {
    let mut game = running_game();
    game.handle(Command::Turn(Direction::Left));
    assert_eq!(game.snake().next_direction(), Direction::Right);
    game.handle(Command::Turn(Direction::Down));
    assert_eq!(game.snake().next_direction(), Direction::Down);
}

#[test]
fn regular_food_scores_one_and_grows() {
    let mut game = running_game();
    food_mut(&mut game).set_regular(Position::new(11, 10));

    let events = game.tick();
    assert_eq!(events, vec![GameEvent::AteFood]);
    assert_eq!(game.score(), 1);

    let food = game.food().unwrap().regular();
    assert!(!game.snake().body().contains(&food));

    park_food(&mut game);
    game.tick();
    assert_eq!(game.snake().len(), 4);
}

#[test]
fn special_food_scores_bonus_and_is_removed() {
    let mut game = running_game();
    park_food(&mut game);
    let clock = game.clock();
    food_mut(&mut game).set_special(Some(special_at(Position::new(11, 10), clock)));

    let events = game.tick();
    assert_eq!(events, vec![GameEvent::AteSpecialFood]);
    assert_eq!(game.score(), SPECIAL_FOOD_BONUS);
    assert!(game.food().unwrap().special().is_none());

    game.tick();
    assert_eq!(game.snake().len(), 4);
}

#[test]
fn score_only_moves_by_food_values() {
    let mut game = running_game();
    let mut last = game.score();
    for step in 0..8 {
        game.handle(Command::Turn(if step % 4 < 2 { Direction::Up } else { Direction::Right }));
        let ahead = game.snake().head().step(game.snake().next_direction());
        if step % 2 == 0 {
            food_mut(&mut game).clear_special();
            food_mut(&mut game).set_regular(ahead);
        } else {
            park_food(&mut game);
            food_mut(&mut game).set_special(Some(special_at(ahead, Duration::ZERO)));
        }

        game.tick();
        let expected = if step % 2 == 0 { 1 } else { SPECIAL_FOOD_BONUS };
        assert_eq!(game.score() - last, expected);
        last = game.score();
    }
}

#[test]
fn wall_collision_ends_game_and_records_high_score() {
    let mut game = running_game();
    game.score = 3;

    let events = crash(&mut game);
    assert_eq!(
        events,
        vec![GameEvent::GameOver { score: 3, new_high_score: true, won: false }]
    );
    assert_eq!(game.high_score().score, 3);
    assert!(game.storage.get(HIGH_SCORE_KEY).is_some());
    assert!(game.snake().head().x >= game.config().grid_size);
}

#[test]
fn equal_score_does_not_replace_high_score() {
    let mut game = running_game();
    game.score = 3;
    crash(&mut game);
    assert!(game.new_high_score());
    let first = game.high_score().clone();

    game.handle(Command::Restart);
    game.score = 3;
    let events = crash(&mut game);
    assert_eq!(
        events,
        vec![GameEvent::GameOver { score: 3, new_high_score: false, won: false }]
    );
    assert!(!game.new_high_score());
    assert_eq!(game.high_score(), &first);
}

#[test]
fn restart_zeroes_score_and_keeps_high_score() {
    let mut game = running_game();
    game.score = 7;
    crash(&mut game);
    assert_eq!(game.state(), GameState::GameOver);

    game.handle(Command::Start);
    assert_eq!(game.state(), GameState::GameOver);

    game.handle(Command::Restart);
    assert_eq!(game.state(), GameState::Running);
    assert_eq!(game.score(), 0);
    assert!(!game.new_high_score());
    assert_eq!(game.high_score().score, 7);
    assert_eq!(game.snake().head(), Position::new(10, 10));
}

#[test]
fn back_to_title_from_game_over() {
    let mut game = running_game();
    crash(&mut game);
    game.handle(Command::BackToTitle);
    assert_eq!(game.state(), GameState::Idle);
    game.handle(Command::Start);
    assert_eq!(game.state(), GameState::Running);
}

#[test]
fn high_score_survives_new_session() {
    let mut storage = MemoryStorage::new();
    storage.set(HIGH_SCORE_KEY, "12").unwrap();
    let game = Game::with_rng(Box::new(storage), StdRng::seed_from_u64(1));
    assert_eq!(game.high_score().score, 12);
}

#[test]
fn pause_keeps_state_and_stops_time() {
    let mut game = running_game();
    park_food(&mut game);
    let body = game.snake().body().to_vec();

    game.handle(Command::TogglePause);
    assert_eq!(game.state(), GameState::Paused);
    assert!(game.update(interval(&game) * 3).is_empty());
    assert_eq!(game.snake().body(), body.as_slice());
    assert_eq!(game.clock(), Duration::ZERO);

    game.handle(Command::Turn(Direction::Up));
    game.handle(Command::TogglePause);
    assert_eq!(game.state(), GameState::Running);
    game.update(interval(&game));
    assert_eq!(game.snake().head(), Position::new(10, 9));
}

#[test]
fn settings_overlay_pauses_and_resumes() {
    let mut game = running_game();
    game.handle(Command::ToggleSettings);
    assert!(game.settings_open());
    assert_eq!(game.state(), GameState::Paused);

    game.handle(Command::ToggleSettings);
    assert!(!game.settings_open());
    assert_eq!(game.state(), GameState::Running);
}

#[test]
fn settings_overlay_leaves_idle_alone() {
    let mut game = make_game();
    game.handle(Command::ToggleSettings);
    game.handle(Command::ToggleSettings);
    assert_eq!(game.state(), GameState::Idle);
}

#[test]
fn update_runs_ticks_on_interval() {
    let mut game = running_game();
    park_food(&mut game);
    let step = interval(&game);

    game.update(step / 2);
    assert_eq!(game.snake().head(), Position::new(10, 10));
    game.update(step / 2);
    assert_eq!(game.snake().head(), Position::new(11, 10));
    game.update(step * 2);
    assert_eq!(game.snake().head(), Position::new(13, 10));
}

#[test]
fn long_frame_is_capped() {
    let mut game = running_game();
    park_food(&mut game);
    game.update(interval(&game) * 50);
    assert_eq!(game.snake().head(), Position::new(10 + MAX_TICKS_PER_UPDATE as i16, 10));
    assert_eq!(game.accumulator, Duration::ZERO);
}

#[test]
fn speed_change_applies_to_next_tick() {
    let mut game = running_game();
    park_food(&mut game);
    game.update(Duration::from_millis(90));

    game.handle(Command::SetSpeed(SpeedPreset::Fast));
    assert_eq!(game.config().tick_interval_ms, 70);
    game.update(Duration::from_millis(60));
    assert_eq!(game.snake().head(), Position::new(10, 10));
    game.update(Duration::from_millis(10));
    assert_eq!(game.snake().head(), Position::new(11, 10));
}

#[test]
fn special_food_expires_on_game_clock() {
    let mut game = running_game();
    park_food(&mut game);
    food_mut(&mut game).set_special(Some(special_at(Position::new(0, 19), Duration::ZERO)));

    // Circle a 2x2 square so the snake stays alive for the whole lifetime.
    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
    let mut expired = false;
    for i in 0..60 {
        game.handle(Command::Turn(turns[i % turns.len()]));
        let events = game.update(interval(&game));
        if events.contains(&GameEvent::SpecialExpired) {
            expired = true;
            break;
        }
    }
    assert!(expired);
    assert!(game.clock() >= SPECIAL_FOOD_LIFETIME);
    assert!(game.food().unwrap().special().is_none());
    assert_eq!(game.score(), 0);
    assert_eq!(game.state(), GameState::Running);
}

#[test]
fn special_toggle_clears_live_special_food() {
    let mut game = running_game();
    food_mut(&mut game).set_special(Some(special_at(Position::new(0, 19), Duration::ZERO)));
    game.handle(Command::ToggleSpecialFood);
    assert!(!game.config().special_food_enabled);
    assert!(game.food().unwrap().special().is_none());
}

#[test]
fn settings_are_persisted_on_every_change() {
    let mut game = make_game();
    game.handle(Command::ToggleGridLines);
    game.handle(Command::CycleTheme);
    game.handle(Command::ToggleAudio);
    game.handle(Command::SetSpeed(SpeedPreset::Slow));

    let reloaded = GameConfig::load(game.storage.as_ref());
    assert_eq!(&reloaded, game.config());
    assert!(!reloaded.grid_lines);
    assert!(reloaded.sound_enabled);
    assert_eq!(reloaded.tick_interval_ms, 150);
    assert!(game.storage.get(CONFIG_KEY).is_some());
}

#[test]
fn filling_the_board_wins() {
    let mut game = running_game();
    let grid = game.config().grid_size;
    // Snake along a zig-zag path covering every cell but the last one, which
    // holds the food. Growth is pending, so eating fills the board.
    let mut body = Vec::new();
    for y in 0..grid {
        let row: Vec<i16> = if y % 2 == 0 { (0..grid).collect() } else { (0..grid).rev().collect() };
        for x in row {
            body.push(Position::new(x, y));
        }
    }
    body.reverse();
    let food_cell = body.remove(0);
    assert_eq!(food_cell, Position::new(0, grid - 1));

    game.snake = Snake::from_parts(body, Direction::Left);
    game.snake.grow();
    food_mut(&mut game).set_regular(food_cell);

    let events = game.tick();
    assert_eq!(game.state(), GameState::GameOver);
    assert!(game.won());
    assert_eq!(game.snake().len(), (grid * grid) as usize);
    assert!(matches!(events.last(), Some(GameEvent::GameOver { won: true, .. })));
}
