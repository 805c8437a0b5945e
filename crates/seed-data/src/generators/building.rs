//! Building generation.

use std::ops::RangeInclusive;

use rand::Rng;

/// Generated building ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBuilding {
    pub building_id: i32,
    pub floors: i32,
}

/// Generates buildings with a random number of floors.
pub struct BuildingGenerator {
    floors: RangeInclusive<i32>,
}

impl BuildingGenerator {
    pub fn new() -> Self {
        Self { floors: 1..=10 }
    }

    /// Generates buildings `1..=count`.
    pub fn generate_batch(&self, count: i32, rng: &mut impl Rng) -> Vec<GeneratedBuilding> {
        (1..=count)
            .map(|building_id| GeneratedBuilding {
                building_id,
                floors: rng.gen_range(self.floors.clone()),
            })
            .collect()
    }
}

impl Default for BuildingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
