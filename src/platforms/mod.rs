//! Source platform handlers and the strategy machinery they share.

pub mod traits;

pub mod generic_ytdlp;
pub mod link_preview;

pub mod dailymotion;
pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod pinterest;
pub mod reddit;
pub mod snapchat;
pub mod spotify;
pub mod threads;
pub mod tiktok;
pub mod twitch;
pub mod twitter;
pub mod youtube;
