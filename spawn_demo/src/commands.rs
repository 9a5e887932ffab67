//! Text commands driving a spawn session
//!
//! Each command is a single word read from stdin. The letter commands follow
//! a keyboard layout: `q w` center, `e r` random, `t y` every region random,
//! `u i` every region center.

use rand::seq::SliceRandom;
use spawn_engine::pool::EntityBackend;
use spawn_engine::spatial::RegionId;
use spawn_engine::spawning::{
    Placement, RegionPlacement, SpawnCoordinator, SpawnError, SpawnReport, SpawnRequest, TemplateSource,
};
use std::fmt::Write as _;
use std::str::FromStr;

use crate::scene::Catalog;

pub const HELP: &str = "\
commands:
  q / w     focus template at the first region's center (x1 / x3)
  e / r     focus template at random points in the first region (x1 / x3)
  t / y     focus template at random points in every region (x1 / x2)
  u / i     focus template at every region's center (x1 / x3)
  rand      random template at every region's center
  rare      drop-table template at every region's center
  drop      deactivate one random active entity
  clear     deactivate everything
  list      show pool contents
  help      show this text
  quit      exit";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),
}

/// A parsed demo command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Focus template at the first region, `count` times
    FirstRegion { placement: RegionPlacement, count: i32 },
    /// Focus template in every region, `count` times each
    EveryRegion { placement: RegionPlacement, count: i32 },
    RandomTemplate,
    Rare,
    Drop,
    Clear,
    List,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use RegionPlacement::{Center, Random};

        let command = match s.trim().to_ascii_lowercase().as_str() {
            "q" => Self::FirstRegion { placement: Center, count: 1 },
            "w" => Self::FirstRegion { placement: Center, count: 3 },
            "e" => Self::FirstRegion { placement: Random, count: 1 },
            "r" => Self::FirstRegion { placement: Random, count: 3 },
            "t" => Self::EveryRegion { placement: Random, count: 1 },
            "y" => Self::EveryRegion { placement: Random, count: 2 },
            "u" => Self::EveryRegion { placement: Center, count: 1 },
            "i" => Self::EveryRegion { placement: Center, count: 3 },
            "rand" => Self::RandomTemplate,
            "rare" => Self::Rare,
            "drop" => Self::Drop,
            "clear" | "space" => Self::Clear,
            "list" | "ls" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "escape" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// What the input loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// Text to show the user
    Print(String),
    Quit,
}

/// Coordinator plus the scene's templates
pub struct Session<'r, B: EntityBackend> {
    coordinator: SpawnCoordinator<'r, B>,
    catalog: Catalog,
}

impl<'r, B: EntityBackend> Session<'r, B> {
    pub fn new(coordinator: SpawnCoordinator<'r, B>, catalog: Catalog) -> Self {
        Self { coordinator, catalog }
    }

    pub fn coordinator(&self) -> &SpawnCoordinator<'r, B> {
        &self.coordinator
    }

    /// Place `count` uniformly chosen templates at random points in every region
    pub fn populate(&mut self, count: i32) -> Result<usize, SpawnError> {
        if count <= 0 {
            log::info!("Skipping initial population");
            return Ok(0);
        }
        let request = SpawnRequest::new(
            TemplateSource::Uniform(&self.catalog.templates),
            Placement::AllRegions(RegionPlacement::Random),
        )
        .with_count(count);
        let report = self.coordinator.spawn(&request)?;
        log::info!("Populated scene with {} entities", report.len());
        Ok(report.len())
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome, SpawnError> {
        match command {
            Command::FirstRegion { placement, count } => {
                let Some(first) = self.first_region() else {
                    log::warn!("Scene has no regions");
                    return Ok(Outcome::Continue);
                };
                let report = self
                    .coordinator
                    .spawn_in_region(&self.catalog.focus, first, placement, count)?;
                Ok(Outcome::Print(describe(&report)))
            }
            Command::EveryRegion { placement, count } => {
                let report = self
                    .coordinator
                    .spawn_in_all_regions(&self.catalog.focus, placement, count)?;
                Ok(Outcome::Print(describe(&report)))
            }
            Command::RandomTemplate => {
                let request = SpawnRequest::new(
                    TemplateSource::Uniform(&self.catalog.templates),
                    Placement::AllRegions(RegionPlacement::Center),
                );
                let report = self.coordinator.spawn(&request)?;
                Ok(Outcome::Print(describe(&report)))
            }
            Command::Rare => {
                let request = SpawnRequest::new(
                    TemplateSource::Weighted(&self.catalog.drops),
                    Placement::AllRegions(RegionPlacement::Center),
                );
                let report = self.coordinator.spawn(&request)?;
                Ok(Outcome::Print(describe(&report)))
            }
            Command::Drop => {
                let active: Vec<B::Handle> = self
                    .coordinator
                    .pool()
                    .entries()
                    .iter()
                    .filter(|entry| entry.is_active())
                    .map(|entry| entry.handle())
                    .collect();
                match active.choose(self.coordinator.rng_mut()) {
                    Some(&handle) => {
                        self.coordinator.deactivate(handle)?;
                        Ok(Outcome::Print(format!("deactivated {handle:?}")))
                    }
                    None => Ok(Outcome::Print("nothing active".to_string())),
                }
            }
            Command::Clear => {
                let count = self.coordinator.deactivate_all();
                Ok(Outcome::Print(format!("deactivated {count} entities")))
            }
            Command::List => Ok(Outcome::Print(self.summary())),
            Command::Help => Ok(Outcome::Print(HELP.to_string())),
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    /// Per-template pool counts followed by coordinator statistics
    pub fn summary(&self) -> String {
        let pool = self.coordinator.pool();
        let mut out = String::new();
        for template in &self.catalog.templates {
            let total = pool.count_of(template);
            let active = pool.entries_of(template).filter(|entry| entry.is_active()).count();
            let _ = writeln!(out, "{:<12} {active:>4} active / {total:>4} pooled", template.name());
        }
        let stats = self.coordinator.stats();
        let _ = write!(
            out,
            "requests {} (rejected {}, failed {}), spawned {} ({} reused, {} created), repeat fallbacks {}",
            stats.requests,
            stats.rejected,
            stats.failed,
            stats.spawned,
            stats.reused,
            stats.created,
            stats.repeat_fallbacks
        );
        out
    }

    fn first_region(&self) -> Option<RegionId> {
        self.coordinator.regions().first().map(|region| region.id())
    }
}

fn describe<H: Copy>(report: &SpawnReport<H>) -> String {
    let mut out = format!(
        "spawned {} ({} reused, {} created)",
        report.len(),
        report.reused_count(),
        report.created_count()
    );
    for spawned in &report.spawned {
        let p = spawned.position;
        let _ = write!(out, "\n  {} at ({:.2}, {:.2}, {:.2})", spawned.template, p.x, p.y, p.z);
    }
    out
}
