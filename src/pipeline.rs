use img_parts::webp::WebP;
use img_parts::{Bytes, ImageEXIF};
use std::path::Path;

use crate::config::{Config, PackDefaults, StickerMetadata};
use crate::error::{Result, StickerError};
use crate::exif::build_exif_chunk;
use crate::transcode::Transcoder;

/// How a media payload is routed through the sticker pipeline.
///
/// Determined by MIME type (or file extension for the CLI):
/// already-WebP input skips normalization entirely, images and videos go
/// through the matching ffmpeg path, and anything else is rejected.
///
/// # Example
///
/// ```rust
/// use sticker_exif::pipeline::MediaKind;
///
/// assert_eq!(MediaKind::from_mime("image/webp").unwrap(), MediaKind::WebP);
/// assert_eq!(MediaKind::from_mime("image/png").unwrap(), MediaKind::Image);
/// assert_eq!(MediaKind::from_mime("video/mp4").unwrap(), MediaKind::Video);
/// assert!(MediaKind::from_mime("application/pdf").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Already a WebP — passed through to embedding unmodified.
    WebP,
    /// Still image — normalized via the image path.
    Image,
    /// Video — normalized via the video path (5s cap, looped, no audio).
    Video,
}

impl MediaKind {
    /// Determine the media kind from a MIME type.
    ///
    /// Unrecognized types are an error rather than being silently treated
    /// as empty input.
    pub fn from_mime(mimetype: &str) -> Result<Self> {
        if mimetype.contains("webp") {
            Ok(Self::WebP)
        } else if mimetype.starts_with("image/") {
            Ok(Self::Image)
        } else if mimetype.starts_with("video/") {
            Ok(Self::Video)
        } else {
            Err(StickerError::UnsupportedMediaType(mimetype.to_string()))
        }
    }

    /// Determine the media kind from a file extension (CLI convenience).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "webp" => Some(Self::WebP),
            "jpg" | "jpeg" | "png" | "gif" | "bmp" => Some(Self::Image),
            "mp4" | "mov" | "mkv" | "webm" | "avi" => Some(Self::Video),
            _ => None,
        }
    }
}

/// Build a sticker from still-image bytes.
///
/// Normalizes the image to a square WebP and embeds the pack metadata.
/// See [`sticker_from_media`] for the full behavior description.
pub async fn sticker_from_image(
    media: &[u8],
    metadata: &StickerMetadata,
    config: &Config,
) -> Result<Vec<u8>> {
    make_sticker(media, MediaKind::Image, metadata, config).await
}

/// Build a sticker from video bytes.
///
/// Normalizes the video to a looping WebP animation (capped at 5 seconds,
/// audio stripped) and embeds the pack metadata.
pub async fn sticker_from_video(
    media: &[u8],
    metadata: &StickerMetadata,
    config: &Config,
) -> Result<Vec<u8>> {
    make_sticker(media, MediaKind::Video, metadata, config).await
}

/// Build a sticker from media bytes tagged with a MIME type.
///
/// This is the main entry point. Dispatch:
///
/// | MIME | route |
/// |------|-------|
/// | `*webp*` | passed through unmodified to the embedding step |
/// | `image/*` | ffmpeg image path |
/// | `video/*` | ffmpeg video path |
/// | anything else | [`StickerError::UnsupportedMediaType`] |
///
/// When none of the branding fields (`pack_name`, `author`, `is_avatar`)
/// is supplied, the embedding step is skipped and the normalized WebP is
/// returned as-is — unbranded stickers don't carry an EXIF chunk. For
/// WebP input this makes the call a byte-identical pass-through.
///
/// Returns the finished sticker bytes; temporary files used during
/// transcoding never outlive the call.
pub async fn sticker_from_media(
    media: &[u8],
    mimetype: &str,
    metadata: &StickerMetadata,
    config: &Config,
) -> Result<Vec<u8>> {
    let kind = MediaKind::from_mime(mimetype)?;
    make_sticker(media, kind, metadata, config).await
}

/// Shared pipeline: normalize (unless already WebP), then embed.
async fn make_sticker(
    media: &[u8],
    kind: MediaKind,
    metadata: &StickerMetadata,
    config: &Config,
) -> Result<Vec<u8>> {
    let transcoder = Transcoder::new(config.ffmpeg_path.as_str());

    let webp = match kind {
        MediaKind::WebP => media.to_vec(),
        MediaKind::Image => transcoder.image_to_webp(media, metadata.double_small).await?,
        MediaKind::Video => transcoder.video_to_webp(media, metadata.double_small).await?,
    };

    if !metadata.has_branding() {
        log::debug!("No branding fields supplied; skipping EXIF embedding");
        return Ok(webp);
    }

    embed_pack_metadata(webp, metadata, &config.defaults)
}

/// Embed the sticker-pack EXIF chunk into WebP bytes.
///
/// Container-aware: the WebP is parsed into its RIFF chunks, the EXIF
/// chunk is set or replaced, and the container is re-serialized. Image
/// data and animation frames pass through untouched.
pub fn embed_pack_metadata(
    webp_bytes: Vec<u8>,
    metadata: &StickerMetadata,
    defaults: &PackDefaults,
) -> Result<Vec<u8>> {
    let chunk = build_exif_chunk(metadata, defaults);

    let mut webp = WebP::from_bytes(Bytes::from(webp_bytes))?;
    webp.set_exif(Some(Bytes::from(chunk)));

    let out = webp.encoder().bytes();
    log::debug!("Embedded sticker metadata ({} bytes total)", out.len());
    Ok(out.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── MediaKind::from_mime ──────────────────────────────────────────

    #[test]
    fn mime_webp_variants() {
        assert_eq!(MediaKind::from_mime("image/webp").unwrap(), MediaKind::WebP);
        assert_eq!(MediaKind::from_mime("webp").unwrap(), MediaKind::WebP);
    }

    #[test]
    fn mime_image() {
        assert_eq!(MediaKind::from_mime("image/png").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("image/jpeg").unwrap(), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("image/gif").unwrap(), MediaKind::Image);
    }

    #[test]
    fn mime_video() {
        assert_eq!(MediaKind::from_mime("video/mp4").unwrap(), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("video/webm").unwrap(), MediaKind::Video);
    }

    #[test]
    fn mime_unsupported_is_explicit_error() {
        let err = MediaKind::from_mime("application/pdf").unwrap_err();
        assert!(matches!(err, StickerError::UnsupportedMediaType(m) if m == "application/pdf"));

        assert!(MediaKind::from_mime("audio/ogg").is_err());
        assert!(MediaKind::from_mime("").is_err());
    }

    // ── MediaKind::from_path ──────────────────────────────────────────

    #[test]
    fn path_dispatch() {
        assert_eq!(MediaKind::from_path(Path::new("a.webp")), Some(MediaKind::WebP));
        assert_eq!(MediaKind::from_path(Path::new("a.PNG")), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_path(Path::new("a.mp4")), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_path(Path::new("a.txt")), None);
        assert_eq!(MediaKind::from_path(Path::new("noext")), None);
    }

    // ── branding guard ───────────────────────────────────────────────

    #[tokio::test]
    async fn webp_without_branding_passes_through() {
        let config = Config::default();
        let media = b"RIFF....WEBP fake container".to_vec();

        let out = sticker_from_media(&media, "image/webp", &StickerMetadata::default(), &config)
            .await
            .unwrap();
        // Guard skips embedding, so the container is never even parsed.
        assert_eq!(out, media);
    }

    #[tokio::test]
    async fn unsupported_mime_never_touches_media() {
        let config = Config::default();
        let err = sticker_from_media(
            b"bytes",
            "application/octet-stream",
            &StickerMetadata::default(),
            &config,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StickerError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn webp_with_branding_requires_valid_container() {
        let config = Config::default();
        let meta = StickerMetadata {
            pack_name: Some("Test".into()),
            ..Default::default()
        };
        let err = sticker_from_media(b"not a webp", "image/webp", &meta, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, StickerError::ContainerParse(_)));
    }
}
