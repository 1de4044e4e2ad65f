pub mod directory;
pub mod events;
pub mod sessions;
pub mod tokens;
pub mod usage;
