//! Department generation.

use rand::Rng;

/// Generated department ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDepartment {
    pub dept_id: i32,
    pub name: String,
    pub building_id: i32,
}

/// Generates departments housed in already-seeded buildings.
pub struct DepartmentGenerator {
    building_count: i32,
}

impl DepartmentGenerator {
    /// `building_count` is the number of buildings seeded before this step.
    /// It must be positive whenever departments are generated.
    pub fn new(building_count: i32) -> Self {
        Self { building_count }
    }

    pub fn generate_batch(&self, count: i32, rng: &mut impl Rng) -> Vec<GeneratedDepartment> {
        (1..=count)
            .map(|dept_id| GeneratedDepartment {
                dept_id,
                name: format!("Department_{dept_id}"),
                building_id: rng.gen_range(1..=self.building_count),
            })
            .collect()
    }
}
