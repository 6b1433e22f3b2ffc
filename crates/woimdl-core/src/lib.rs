pub mod cache;
pub mod config;
pub mod fetch;
pub mod filename;
pub mod logging;
pub mod resolver;
pub mod token;
