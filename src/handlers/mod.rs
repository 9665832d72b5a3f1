pub mod calendar;
pub mod entries;
pub mod health;
pub mod moods;
pub mod stats;
pub mod users;
pub mod ws;
