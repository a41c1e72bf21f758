pub mod core;
pub mod import_id;
pub mod records;
pub mod stats;
pub mod taxonomy;
