use crate::game::{Game, GameState};
use crate::snake::{Direction, Position};
use crate::theme::Palette;
use ggez::graphics::{Canvas, DrawMode, DrawParam, Mesh, MeshBuilder, Rect, Text};
use ggez::mint::Point2;
use ggez::{Context, GameResult};
use std::f32::consts::PI;

pub const CELL_SIZE: f32 = 24.0;

const HUD_SCALE: f32 = 16.0;
const TITLE_SCALE: f32 = 40.0;
const LINE_SCALE: f32 = 20.0;
const STAR_SPIKES: usize = 5;

pub fn screen_size(grid_size: i16) -> f32 {
    grid_size as f32 * CELL_SIZE
}

pub fn cell_rect(pos: Position, padding: f32) -> Rect {
    Rect::new(
        pos.x as f32 * CELL_SIZE + padding,
        pos.y as f32 * CELL_SIZE + padding,
        CELL_SIZE - padding * 2.0,
        CELL_SIZE - padding * 2.0,
    )
}

fn cell_center(pos: Position) -> Point2<f32> {
    Point2 {
        x: pos.x as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        y: pos.y as f32 * CELL_SIZE + CELL_SIZE / 2.0,
    }
}

/// Outline of a star starting at the top spike, alternating outer and inner
/// vertices clockwise.
pub fn star_points(center: Point2<f32>, spikes: usize, outer: f32, inner: f32) -> Vec<Point2<f32>> {
    let step = PI / spikes as f32;
    let mut rot = PI / 2.0 * 3.0;
    let mut points = Vec::with_capacity(spikes * 2);
    for _ in 0..spikes {
        points.push(Point2 {
            x: center.x + rot.cos() * outer,
            y: center.y + rot.sin() * outer,
        });
        rot += step;
        points.push(Point2 {
            x: center.x + rot.cos() * inner,
            y: center.y + rot.sin() * inner,
        });
        rot += step;
    }
    points
}

/// The two eye squares on the head, pushed towards the direction of travel.
pub fn eye_rects(head: Position, direction: Direction) -> [Rect; 2] {
    let size = CELL_SIZE / 5.0;
    let (x, y) = (head.x as f32 * CELL_SIZE, head.y as f32 * CELL_SIZE);
    let third = CELL_SIZE / 3.0;
    let two_thirds = CELL_SIZE * 2.0 / 3.0;

    let (left, right) = match direction {
        Direction::Up => (
            (x + third - size / 2.0, y + third),
            (x + two_thirds - size / 2.0, y + third),
        ),
        Direction::Down => (
            (x + third - size / 2.0, y + two_thirds - size),
            (x + two_thirds - size / 2.0, y + two_thirds - size),
        ),
        Direction::Left => (
            (x + third, y + third - size / 2.0),
            (x + third, y + two_thirds - size / 2.0),
        ),
        Direction::Right => (
            (x + two_thirds - size, y + third - size / 2.0),
            (x + two_thirds - size, y + two_thirds - size / 2.0),
        ),
    };
    [
        Rect::new(left.0, left.1, size, size),
        Rect::new(right.0, right.1, size, size),
    ]
}

pub fn draw(ctx: &mut Context, canvas: &mut Canvas, game: &Game, palette: &Palette) -> GameResult {
    let screen = screen_size(game.config().grid_size);

    if game.config().grid_lines {
        draw_grid(ctx, canvas, game.config().grid_size, palette)?;
    }
    if game.state() != GameState::Idle {
        draw_food(ctx, canvas, game, palette)?;
        draw_snake(ctx, canvas, game, palette)?;
        draw_hud(canvas, game, palette);
    }

    match game.state() {
        GameState::Idle => draw_title(ctx, canvas, game, palette, screen)?,
        GameState::Paused if !game.settings_open() => {
            draw_message(ctx, canvas, palette, screen, &["Paused", "Space to resume"])?
        }
        GameState::GameOver => draw_game_over(ctx, canvas, game, palette, screen)?,
        _ => {}
    }
    if game.settings_open() {
        draw_settings(ctx, canvas, game, palette, screen)?;
    }
    Ok(())
}

fn draw_grid(ctx: &mut Context, canvas: &mut Canvas, grid_size: i16, palette: &Palette) -> GameResult {
    let end = screen_size(grid_size);
    let mut mb = MeshBuilder::new();
    for i in 0..=grid_size {
        let at = i as f32 * CELL_SIZE;
        mb.line(&[Point2 { x: at, y: 0.0 }, Point2 { x: at, y: end }], 1.0, palette.grid)?;
        mb.line(&[Point2 { x: 0.0, y: at }, Point2 { x: end, y: at }], 1.0, palette.grid)?;
    }
    let mesh = Mesh::from_data(ctx, mb.build());
    canvas.draw(&mesh, DrawParam::default());
    Ok(())
}

fn draw_snake(ctx: &mut Context, canvas: &mut Canvas, game: &Game, palette: &Palette) -> GameResult {
    let snake = game.snake();
    for (i, pos) in snake.body().iter().enumerate() {
        let padding = if i == 0 { 1.0 } else { 2.0 };
        let rect = cell_rect(*pos, padding);
        canvas.draw(
            &Mesh::new_rectangle(ctx, DrawMode::fill(), rect, palette.snake)?,
            DrawParam::default(),
        );
        canvas.draw(
            &Mesh::new_rectangle(ctx, DrawMode::stroke(2.0), rect, palette.snake_border)?,
            DrawParam::default(),
        );
    }

    for eye in eye_rects(snake.head(), snake.direction()) {
        canvas.draw(
            &Mesh::new_rectangle(ctx, DrawMode::fill(), eye, palette.eyes)?,
            DrawParam::default(),
        );
    }
    Ok(())
}

fn draw_food(ctx: &mut Context, canvas: &mut Canvas, game: &Game, palette: &Palette) -> GameResult {
    let food = match game.food() {
        Some(food) => food,
        None => return Ok(()),
    };

    let center = cell_center(food.regular());
    let radius = CELL_SIZE / 2.0 - 2.0;
    canvas.draw(
        &Mesh::new_circle(ctx, DrawMode::fill(), center, radius, 0.1, palette.food)?,
        DrawParam::default(),
    );
    canvas.draw(
        &Mesh::new_circle(ctx, DrawMode::stroke(2.0), center, radius, 0.1, palette.food_border)?,
        DrawParam::default(),
    );

    if let Some(special) = food.special() {
        let points = star_points(
            cell_center(special.pos),
            STAR_SPIKES,
            CELL_SIZE / 2.0 - 3.0,
            CELL_SIZE / 4.0,
        );
        canvas.draw(
            &Mesh::new_polygon(ctx, DrawMode::fill(), &points, palette.special_food)?,
            DrawParam::default(),
        );
    }
    Ok(())
}

fn draw_hud(canvas: &mut Canvas, game: &Game, palette: &Palette) {
    let speed = game
        .config()
        .speed_preset()
        .map(|preset| preset.name().to_string())
        .unwrap_or_else(|| format!("{}ms", game.config().tick_interval_ms));
    let mut line = format!(
        "Score: {} | High Score: {} | Length: {} | Speed: {}",
        game.score(),
        game.high_score().score,
        game.snake().len(),
        speed,
    );
    if let Some(special) = game.food().and_then(|food| food.special()) {
        let left = special.timer.remaining(game.clock()).as_secs_f32();
        line.push_str(&format!(" | Bonus: {:.1}s", left));
    }

    let mut text = Text::new(line);
    text.set_scale(HUD_SCALE);
    canvas.draw(
        &text,
        DrawParam::default()
            .dest(Point2 { x: 6.0, y: 4.0 })
            .color(palette.text),
    );
}

fn draw_title(ctx: &mut Context, canvas: &mut Canvas, game: &Game, palette: &Palette, screen: f32) -> GameResult {
    let high = game.high_score();
    let high_line = match &high.achieved_at {
        Some(at) => format!("High score: {} ({})", high.score, at.format("%Y-%m-%d %H:%M")),
        None => format!("High score: {}", high.score),
    };
    draw_message(
        ctx,
        canvas,
        palette,
        screen,
        &[
            "SNAKE",
            "Enter to start",
            "Arrows/WASD move, Space pauses",
            "Tab opens settings",
            &high_line,
        ],
    )
}

fn draw_game_over(ctx: &mut Context, canvas: &mut Canvas, game: &Game, palette: &Palette, screen: f32) -> GameResult {
    let headline = if game.won() { "You filled the board!" } else { "Game Over!" };
    let score_line = format!("Score: {}", game.score());
    let high_line = if game.new_high_score() {
        "New high score!".to_string()
    } else {
        format!("High Score: {}", game.high_score().score)
    };
    draw_message(
        ctx,
        canvas,
        palette,
        screen,
        &[headline, &score_line, &high_line, "Enter to restart", "Backspace for title"],
    )
}

fn draw_settings(ctx: &mut Context, canvas: &mut Canvas, game: &Game, palette: &Palette, screen: f32) -> GameResult {
    let config = game.config();
    let on_off = |on: bool| if on { "on" } else { "off" };
    let speed = config.speed_preset().map_or("custom", |preset| preset.name());
    let lines = [
        "Settings".to_string(),
        format!("[1/2/3] Speed: {}", speed),
        format!("[T] Theme: {}", config.theme.name()),
        format!("[G] Grid lines: {}", on_off(config.grid_lines)),
        format!("[F] Special food: {}", on_off(config.special_food_enabled)),
        format!("[M] Sound: {}", on_off(config.sound_enabled)),
        "Tab to close".to_string(),
    ];
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    draw_message(ctx, canvas, palette, screen, &lines)
}

/// Dims the board and stacks `lines` in the middle; the first one is the title.
fn draw_message(ctx: &mut Context, canvas: &mut Canvas, palette: &Palette, screen: f32, lines: &[&str]) -> GameResult {
    canvas.draw(
        &Mesh::new_rectangle(
            ctx,
            DrawMode::fill(),
            Rect::new(0.0, 0.0, screen, screen),
            palette.overlay,
        )?,
        DrawParam::default(),
    );

    let height = TITLE_SCALE + LINE_SCALE * 1.5 * (lines.len().saturating_sub(1)) as f32;
    let mut y = (screen - height) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        let scale = if i == 0 { TITLE_SCALE } else { LINE_SCALE };
        let mut text = Text::new(*line);
        text.set_scale(scale);
        canvas.draw(
            &text,
            DrawParam::default()
                .dest(Point2 { x: centered_x(line, scale, screen), y })
                .color(palette.text),
        );
        y += if i == 0 { TITLE_SCALE * 1.2 } else { LINE_SCALE * 1.5 };
    }
    Ok(())
}

// Glyphs average about half their scale in width.
fn centered_x(line: &str, scale: f32, screen: f32) -> f32 {
    let width = line.chars().count() as f32 * scale * 0.5;
    ((screen - width) / 2.0).max(4.0)
}
