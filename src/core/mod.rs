pub mod classify;
pub mod executor;
pub mod normalize;
pub mod pacing;
pub mod profiles;
pub mod registry;
pub mod renditions;
pub mod stealth;
pub mod ytdlp;
