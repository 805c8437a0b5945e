//! Row generators for the room-booking tables.
//!
//! Every generator numbers its rows `1..=count` and draws foreign keys
//! uniformly from the id ranges of the parent tables it is given:
//! - [`BuildingGenerator`]: buildings with 1-10 floors
//! - [`DepartmentGenerator`]: departments housed in buildings
//! - [`AccountGenerator`]: admins and users belonging to departments
//! - [`RoomGenerator`]: rooms with a type and capacity
//! - [`BookingGenerator`]: booking requests for rooms by users
//! - [`ScheduleGenerator`]: one-hour slots for bookings

pub mod account;
pub mod booking;
pub mod building;
pub mod department;
pub mod room;
pub mod schedule;

pub use account::{AccountGenerator, AccountRole, GeneratedAccount};
pub use booking::{BookingCategory, BookingGenerator, BookingStatus, GeneratedBooking};
pub use building::{BuildingGenerator, GeneratedBuilding};
pub use department::{DepartmentGenerator, GeneratedDepartment};
pub use room::{GeneratedRoom, RoomGenerator, RoomType};
pub use schedule::{GeneratedSchedule, ScheduleGenerator, Weekday};
