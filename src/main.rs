use ggez::conf::{WindowMode, WindowSetup};
use ggez::{event, ContextBuilder};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod error;
mod food;
mod game;
mod render;
mod score;
mod snake;
mod storage;
mod theme;

use app::App;
use game::Game;
use storage::FileStorage;

const STORAGE_PATH_VAR: &str = "SNAKE_STORAGE_PATH";
const DEFAULT_STORAGE_PATH: &str = "snake_storage.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_snake=info")))
        .init();

    let storage_path = env::var(STORAGE_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH));
    let game = Game::new(Box::new(FileStorage::open(storage_path)));

    let screen = render::screen_size(game.config().grid_size);
    let window_setup = WindowSetup::default().title("Snake").vsync(true);
    let window_mode = WindowMode::default()
        .dimensions(screen, screen)
        .resizable(false);

    let (mut ctx, event_loop) = ContextBuilder::new("grid_snake", "grid_snake")
        .add_resource_path(PathBuf::from("./resources"))
        .window_setup(window_setup)
        .window_mode(window_mode)
        .build()?;

    let app = App::new(&mut ctx, game);
    event::run(ctx, event_loop, app)
}
