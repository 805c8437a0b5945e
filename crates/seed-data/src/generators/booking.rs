//! Booking request generation.

use std::ops::RangeInclusive;

use rand::Rng;
use time::{Duration, PrimitiveDateTime};

/// Booking category options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingCategory {
    Event,
    Regular,
    Extra,
    Labs,
}

impl BookingCategory {
    pub const ALL: [BookingCategory; 4] = [
        BookingCategory::Event,
        BookingCategory::Regular,
        BookingCategory::Extra,
        BookingCategory::Labs,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingCategory::Event => "EVENT",
            BookingCategory::Regular => "REGULAR",
            BookingCategory::Extra => "EXTRA",
            BookingCategory::Labs => "LABS",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Booking status options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Approved,
        BookingStatus::Rejected,
    ];

    /// Returns the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Generated booking ready for database insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBooking {
    pub request_id: i32,
    pub category: BookingCategory,
    pub room_id: i32,
    pub user_id: i32,
    pub status: BookingStatus,
    pub start_date: PrimitiveDateTime,
    pub end_date: PrimitiveDateTime,
    pub description: String,
}

/// Generates bookings by already-seeded users for already-seeded rooms.
pub struct BookingGenerator {
    /// How many days ahead of now a booking may start.
    lead_days: RangeInclusive<i64>,
    duration: Duration,
    room_count: i32,
    user_count: i32,
}

impl BookingGenerator {
    /// Both parent counts must be positive whenever bookings are generated.
    pub fn new(room_count: i32, user_count: i32) -> Self {
        Self {
            lead_days: 1..=10,
            duration: Duration::hours(2),
            room_count,
            user_count,
        }
    }

    pub fn generate_batch(
        &self,
        count: i32,
        now: PrimitiveDateTime,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedBooking> {
        (1..=count)
            .map(|request_id| {
                let start_date = now + Duration::days(rng.gen_range(self.lead_days.clone()));
                GeneratedBooking {
                    request_id,
                    category: BookingCategory::random(rng),
                    room_id: rng.gen_range(1..=self.room_count),
                    user_id: rng.gen_range(1..=self.user_count),
                    status: BookingStatus::random(rng),
                    start_date,
                    end_date: start_date + self.duration,
                    description: format!("Description_{request_id}"),
                }
            })
            .collect()
    }
}
