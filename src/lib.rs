//! # sticker-exif
//!
//! WhatsApp sticker builder — normalize arbitrary image/video bytes into a
//! square, looping WebP via an external ffmpeg invocation, then embed the
//! sticker-pack descriptor WhatsApp clients read out of the WebP EXIF
//! chunk (pack name, publisher, emoji tags, avatar flag).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sticker_exif::config::{Config, StickerMetadata};
//! use sticker_exif::pipeline::sticker_from_media;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let media = std::fs::read("cat.mp4")?;
//!
//!     let metadata = StickerMetadata {
//!         pack_name: Some("Cat Pack".into()),
//!         author: Some("me".into()),
//!         categories: Some(vec!["🐱".into()]),
//!         ..Default::default()
//!     };
//!
//!     let sticker = sticker_from_media(&media, "video/mp4", &metadata, &config).await?;
//!     std::fs::write("cat.webp", &sticker)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Lower-Level Usage
//!
//! The stages compose individually: transcode, build the chunk, embed.
//!
//! ```rust,no_run
//! use sticker_exif::config::{PackDefaults, StickerMetadata};
//! use sticker_exif::exif::{build_exif_chunk, read_sticker_exif};
//! use sticker_exif::pipeline::embed_pack_metadata;
//! use sticker_exif::transcode::Transcoder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let media = std::fs::read("photo.png")?;
//!
//!     // 1. Normalize to a 320×320 WebP
//!     let transcoder = Transcoder::new("ffmpeg");
//!     let webp = transcoder.image_to_webp(&media, false).await?;
//!
//!     // 2. Embed the pack descriptor
//!     let metadata = StickerMetadata {
//!         pack_name: Some("My Pack".into()),
//!         ..Default::default()
//!     };
//!     let sticker = embed_pack_metadata(webp, &metadata, &PackDefaults::default())?;
//!
//!     // 3. Read it back
//!     let info = read_sticker_exif(&sticker)?.expect("descriptor present");
//!     assert_eq!(info.pack_name, "My Pack");
//!     Ok(())
//! }
//! ```
//!
//! ## Media Dispatch
//!
//! | Input MIME | Route |
//! |------------|-------|
//! | `*webp*` | Passed through to embedding unmodified |
//! | `image/*` | ffmpeg image path — scale, pad to square, transparent border |
//! | `video/*` | ffmpeg video path — plus 5s cap, 15 fps, loop, audio stripped |
//! | anything else | `StickerError::UnsupportedMediaType` |
//!
//! When no branding field (`pack_name`, `author`, `is_avatar`) is supplied,
//! embedding is skipped entirely and the normalized WebP is returned
//! without an EXIF chunk.
//!
//! ## Modules
//!
//! - [`config`] — metadata record, pack defaults, JSON config load/save
//! - [`error`] — the [`StickerError`](error::StickerError) taxonomy
//! - [`exif`] — EXIF chunk construction and read-back
//! - [`pipeline`] — media dispatch, assembly, and container embedding
//! - [`transcode`] — the ffmpeg normalization step

pub mod config;
pub mod error;
pub mod exif;
pub mod pipeline;
pub mod transcode;
