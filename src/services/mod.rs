pub mod stats;
pub mod timeline;
