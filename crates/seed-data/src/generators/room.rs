//! Room generation.

use std::ops::RangeInclusive;

use rand::Rng;

/// Room type options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    LectureHall,
    Lab,
    MeetingRoom,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::LectureHall, RoomType::Lab, RoomType::MeetingRoom];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::LectureHall => "Lecture Hall",
            RoomType::Lab => "Lab",
            RoomType::MeetingRoom => "Meeting Room",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Generated room ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRoom {
    pub room_id: i32,
    pub room_name: String,
    pub room_type: RoomType,
    pub capacity: i32,
}

/// Generates rooms. Rooms have no parents.
pub struct RoomGenerator {
    capacity: RangeInclusive<i32>,
}

impl RoomGenerator {
    pub fn new() -> Self {
        Self { capacity: 10..=100 }
    }

    pub fn generate_batch(&self, count: i32, rng: &mut impl Rng) -> Vec<GeneratedRoom> {
        (1..=count)
            .map(|room_id| GeneratedRoom {
                room_id,
                room_name: format!("Room_{room_id}"),
                room_type: RoomType::random(rng),
                capacity: rng.gen_range(self.capacity.clone()),
            })
            .collect()
    }
}

impl Default for RoomGenerator {
    fn default() -> Self {
        Self::new()
    }
}
