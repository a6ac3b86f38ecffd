pub mod config;
pub mod logging;

// Icon pipeline: resolver, normalizer, store, upload pre-filter.
pub mod favicon;
pub mod normalize;
pub mod store;
pub mod upload;

// Record layer the CLI drives.
pub mod link_db;
