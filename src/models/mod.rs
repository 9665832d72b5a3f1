pub mod entry;
pub mod icon;
pub mod mood;
pub mod user;
