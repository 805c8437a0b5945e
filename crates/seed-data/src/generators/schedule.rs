//! Schedule slot generation.

use std::ops::RangeInclusive;

use rand::Rng;
use time::{Duration, PrimitiveDateTime};

/// Weekday a slot repeats on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Generated schedule slot ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSchedule {
    pub id: i32,
    pub request_id: i32,
    pub room_id: i32,
    pub start_time: PrimitiveDateTime,
    pub end_time: PrimitiveDateTime,
    pub day: Weekday,
}

/// Generates one-hour slots for already-seeded bookings and rooms.
///
/// The slot's room is drawn independently of the booking's room.
pub struct ScheduleGenerator {
    lead_hours: RangeInclusive<i64>,
    duration: Duration,
    booking_count: i32,
    room_count: i32,
}

impl ScheduleGenerator {
    /// Both parent counts must be positive whenever slots are generated.
    pub fn new(booking_count: i32, room_count: i32) -> Self {
        Self {
            lead_hours: 1..=48,
            duration: Duration::hours(1),
            booking_count,
            room_count,
        }
    }

    pub fn generate_batch(
        &self,
        count: i32,
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedSchedule> {
        (1..=count)
            .map(|id| {
                let request_id = rng.gen_range(1..=self.booking_count);
                let room_id = rng.gen_range(1..=self.room_count);
                let start_time = now + Duration::hours(rng.gen_range(self.lead_hours.clone()));
                GeneratedSchedule {
                    id,
                    request_id,
                    room_id,
                    start_time,
                    end_time: start_time + self.duration,
                    day: Weekday::random(rng),
                }
            })
            .collect()
    }
}
