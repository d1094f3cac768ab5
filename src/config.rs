//! Mission configuration: map size, obstacle density, seed, and roster.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::SimError;
use crate::grid;
use crate::rover::Heading;
use crate::scheduler::CommandRequest;

/// One rover definition plus the command string it will execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoverSpec {
    pub name: String,
    pub heading: Heading,
    pub commands: String,
}

impl RoverSpec {
    pub fn new(name: impl Into<String>, heading: Heading, commands: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            heading,
            commands: commands.into(),
        }
    }

    /// Parse `name:heading:commands`, e.g. `Alpha:N:ffrff`.
    ///
    /// Commands are not checked here; a bad command string is reported
    /// when the batch runs.
    pub fn parse(arg: &str) -> Option<Self> {
        let mut parts = arg.splitn(3, ':');
        let name = parts.next()?.trim();
        let heading = Heading::parse(parts.next()?)?;
        let commands = parts.next().unwrap_or("");
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, heading, commands))
    }
}

/// Everything needed to set up and run a single mission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    pub obstacles: usize,
    /// Fixed seed for reproducible placement; drawn from entropy when absent.
    pub seed: Option<u64>,
    pub rovers: Vec<RoverSpec>,
}

impl Default for SimConfig {
    /// Built-in demo mission.
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            obstacles: 12,
            seed: None,
            rovers: vec![
                RoverSpec::new("Alpha", Heading::North, "ffrfflfbbrff"),
                RoverSpec::new("Bravo", Heading::East, "fflffrbbf"),
                RoverSpec::new("Charlie", Heading::South, "rffflf"),
            ],
        }
    }
}

impl SimConfig {
    /// Reject configurations that cannot produce a map before any work is done.
    pub fn validate(&self) -> Result<(), SimError> {
        let capacity = grid::cell_count(self.width, self.height)?;
        if self.rovers.is_empty() {
            return Err(SimError::EmptyRoster);
        }
        let mut names = HashSet::new();
        for spec in &self.rovers {
            if !names.insert(spec.name.as_str()) {
                return Err(SimError::DuplicateRover(spec.name.clone()));
            }
        }
        let requested = self
            .obstacles
            .checked_add(self.rovers.len())
            .unwrap_or(usize::MAX);
        if requested > capacity {
            return Err(SimError::InsufficientSpace {
                requested,
                available: capacity,
            });
        }
        Ok(())
    }

    pub fn roster(&self) -> Vec<(String, Heading)> {
        self.rovers
            .iter()
            .map(|spec| (spec.name.clone(), spec.heading))
            .collect()
    }

    pub fn requests(&self) -> Vec<CommandRequest> {
        self.rovers
            .iter()
            .map(|spec| CommandRequest::new(spec.name.clone(), spec.commands.clone()))
            .collect()
    }

    /// Seeded placement RNG together with the seed actually used.
    pub fn rng(&self) -> (u64, ChaCha8Rng) {
        let seed = self.seed.unwrap_or_else(rand::random);
        (seed, ChaCha8Rng::seed_from_u64(seed))
    }
}
