//! Species data for Hookline.

use common::{GameError, GameResult};
use serde::Deserialize;

/// Fish species parameters loaded from JSON.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FishSpec {
    pub name: String,
    /// Score awarded when caught. Zero marks a hazard species.
    pub score: i32,
    /// Relative spawn weight.
    pub weight: u32,
}

impl FishSpec {
    /// Returns whether catching this species voids the whole haul.
    pub fn is_hazard(&self) -> bool {
        self.score == 0
    }
}

/// Weighted table of spawnable species.
#[derive(Clone, Debug)]
pub struct SpeciesTable {
    specs: Vec<FishSpec>,
    total_weight: u32,
}

impl SpeciesTable {
    /// Builds a table, rejecting empty input, negative scores and a
    /// zero total weight.
    pub fn new(specs: Vec<FishSpec>) -> GameResult<Self> {
        if specs.is_empty() {
            return Err(GameError::InvalidOperation);
        }
        if let Some(bad) = specs.iter().find(|s| s.score < 0) {
            return Err(GameError::Parse(format!(
                "negative score for species {}",
                bad.name
            )));
        }
        let total_weight = specs.iter().map(|s| s.weight).sum();
        if total_weight == 0 {
            return Err(GameError::Parse("all spawn weights are zero".into()));
        }
        Ok(Self {
            specs,
            total_weight,
        })
    }

    /// Returns the species list in file order.
    pub fn specs(&self) -> &[FishSpec] {
        &self.specs
    }

    /// Picks a species by spawn weight from a uniform `[0, 1)` roll.
    pub fn pick(&self, roll: f32) -> &FishSpec {
        let mut threshold = roll.clamp(0.0, 1.0) * self.total_weight as f32;
        for spec in &self.specs {
            threshold -= spec.weight as f32;
            if threshold < 0.0 {
                return spec;
            }
        }
        // roll == 1.0 lands past the last bucket
        &self.specs[self.specs.len() - 1]
    }
}

/// Loads a [`SpeciesTable`] from the given JSON file path.
pub fn load_species(path: &str) -> GameResult<SpeciesTable> {
    let data = std::fs::read_to_string(path)?;
    parse_species_json(&data)
}

/// Loads the [`SpeciesTable`] embedded at compile time (used on WASM and
/// as the default when no file is given).
pub fn load_species_embedded() -> GameResult<SpeciesTable> {
    parse_species_json(include_str!("../../../assets/species.json"))
}

fn parse_species_json(data: &str) -> GameResult<SpeciesTable> {
    let specs: Vec<FishSpec> =
        serde_json::from_str(data).map_err(|e| GameError::Parse(e.to_string()))?;
    SpeciesTable::new(specs)
}
