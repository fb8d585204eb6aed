pub mod field;
pub mod library;
pub mod record;
pub mod stats;
