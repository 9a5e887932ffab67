//! Spawn engine demo
//!
//! Loads a scene (or uses the built-in one), populates every region, then
//! reads commands from stdin. Run with `spawn_demo [scene.ron|scene.toml]`.

mod commands;
mod scene;

use commands::{Command, Outcome, Session, HELP};
use scene::{SceneConfig, SceneError};
use spawn_engine::config::Config;
use spawn_engine::foundation::logging;
use spawn_engine::pool::HeadlessBackend;
use spawn_engine::spawning::SpawnCoordinator;
use std::io::{self, BufRead, Write};

fn load_scene(path: Option<String>) -> Result<SceneConfig, SceneError> {
    match path {
        Some(path) => {
            log::info!("Loading scene from {}", path);
            Ok(SceneConfig::load_from_file(&path)?)
        }
        None => {
            log::info!("No scene given, using built-in scene");
            Ok(SceneConfig::default())
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_scene(std::env::args().nth(1))?;
    let regions = config.build_regions()?;

    let mut coordinator = SpawnCoordinator::from_config(&regions, HeadlessBackend::new(), &config.spawner)?;
    let catalog = config.register_catalog(&mut coordinator)?;

    let mut session = Session::new(coordinator, catalog);
    session.populate(config.initial_count_per_region)?;

    println!("{HELP}");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = match input.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match session.apply(command) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Print(text)) => println!("{text}"),
            Ok(Outcome::Quit) => break,
            Err(e) => log::warn!("'{}' failed: {}", input, e),
        }
        stdout.flush()?;
    }

    let pool = session.coordinator().pool();
    log::info!("Exiting with {} pooled entities, {} active", pool.len(), pool.active_count());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting spawn demo");

    match run() {
        Ok(()) => {
            log::info!("Spawn demo finished");
            Ok(())
        }
        Err(e) => {
            log::error!("Spawn demo failed: {}", e);
            Err(e)
        }
    }
}
