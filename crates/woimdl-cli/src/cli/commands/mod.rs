//! Command handlers, one per target kind.

mod album;
mod song;

pub use album::run_album;
pub use song::run_song;
