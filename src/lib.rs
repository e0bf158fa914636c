//! linkgrab resolves share URLs from media platforms into direct, canonical
//! download records.
//!
//! The pipeline: a URL is routed to its platform handler, the handler's
//! ordered strategies are tried one by one under nested deadlines, and the
//! first usable result is normalized into a [`MediaInfo`]. All upstream
//! traffic flows through a browser-shaped outbound layer that paces per host
//! and can tunnel through a trusted relay.
//!
//! ```no_run
//! # async fn run() -> Result<(), linkgrab::ExtractError> {
//! let extractor = linkgrab::Extractor::new(linkgrab::Config::from_env());
//! let media = extractor.extract("https://youtu.be/dQw4w9WgXcQ").await?;
//! println!("{} -> {}", media.title, media.download_url);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod extractor;
pub mod models;
pub mod platforms;

pub use config::Config;
pub use error::ExtractError;
pub use extractor::Extractor;
pub use models::media::{MediaInfo, MediaType};
