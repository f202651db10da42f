pub mod json_store;
pub mod notes;
pub mod progress;
pub mod schema;
