//! Media normalization via an external ffmpeg invocation.
//!
//! Arbitrary image or video bytes go in; a compact, square, looping WebP
//! with a transparent border comes out. The pixel work is entirely
//! delegated to ffmpeg — this module only builds the filter graph and
//! manages the temporary files around the subprocess call.

use std::io::Write;
use std::path::PathBuf;
use tokio::process::Command;

use crate::error::{Result, StickerError};

/// Output frame rate for animated stickers.
const STICKER_FPS: u32 = 15;

/// Default square canvas edge, in pixels.
const CANVAS_SMALL: u32 = 320;

/// Enlarged canvas edge used by the double-small policy.
const CANVAS_LARGE: u32 = 640;

/// Sources at or under this edge length in both dimensions qualify for
/// the enlarged canvas (inclusive boundary).
const UPSCALE_THRESHOLD: u32 = 1280;

/// Maximum output duration for video sources.
const MAX_VIDEO_DURATION: &str = "00:00:05";

/// Wrapper around the external ffmpeg executable.
///
/// Stateless and safe to share between concurrent callers: every call
/// operates on its own randomly named temporary files, which are removed
/// on both success and failure paths when their guards drop.
///
/// # Example
///
/// ```rust,no_run
/// use sticker_exif::transcode::Transcoder;
///
/// # async fn example() -> sticker_exif::error::Result<()> {
/// let transcoder = Transcoder::new("ffmpeg");
/// let media = std::fs::read("photo.jpg")?;
/// let webp = transcoder.image_to_webp(&media, false).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Transcoder {
    ffmpeg: PathBuf,
}

impl Transcoder {
    pub fn new(ffmpeg: impl Into<PathBuf>) -> Self {
        Self { ffmpeg: ffmpeg.into() }
    }

    /// Convert still-image bytes into a square WebP.
    pub async fn image_to_webp(&self, media: &[u8], double_small: bool) -> Result<Vec<u8>> {
        self.run(media, ".jpg", false, double_small).await
    }

    /// Convert video bytes into a looping WebP animation.
    ///
    /// Output is capped at 5 seconds, resampled to 15 fps, looped
    /// indefinitely, and stripped of audio.
    pub async fn video_to_webp(&self, media: &[u8], double_small: bool) -> Result<Vec<u8>> {
        self.run(media, ".mp4", true, double_small).await
    }

    async fn run(
        &self,
        media: &[u8],
        input_suffix: &str,
        video: bool,
        double_small: bool,
    ) -> Result<Vec<u8>> {
        // Scoped temp files: dropped (and unlinked) on every exit path.
        let mut input = tempfile::Builder::new()
            .prefix("sticker-in-")
            .suffix(input_suffix)
            .tempfile()?;
        input.write_all(media)?;
        input.flush()?;

        let output = tempfile::Builder::new()
            .prefix("sticker-out-")
            .suffix(".webp")
            .tempfile()?;

        let filter = filter_graph(double_small);
        log::debug!(
            "Transcoding {} bytes via {} (filter: {filter})",
            media.len(),
            self.ffmpeg.display()
        );

        let mut cmd = Command::new(&self.ffmpeg);
        cmd.args(["-hide_banner", "-loglevel", "error"])
            .arg("-i")
            .arg(input.path())
            .args(["-vcodec", "libwebp", "-vf"])
            .arg(&filter);
        if video {
            cmd.args([
                "-loop", "0",
                "-ss", "00:00:00",
                "-t", MAX_VIDEO_DURATION,
                "-preset", "default",
                "-an",
                "-vsync", "0",
            ]);
        }
        cmd.args(["-f", "webp", "-y"]).arg(output.path());

        let result = cmd.output().await?;
        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("ffmpeg exited with {}", result.status)
            } else {
                stderr
            };
            log::warn!("ffmpeg failed: {detail}");
            return Err(StickerError::Transcode(detail));
        }

        let webp = std::fs::read(output.path())?;
        if webp.is_empty() {
            return Err(StickerError::Transcode("ffmpeg produced no output".to_string()));
        }
        Ok(webp)
    }
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

/// Build the ffmpeg filter graph for sticker output.
///
/// Scale down preserving aspect ratio, resample to 15 fps, pad to a square
/// canvas with a fully transparent border, then palettegen/paletteuse with
/// transparency reserved so the WebP keeps its alpha.
///
/// With `double_small`, sources at or under 1280×1280 in both dimensions
/// are upscaled (×2, capped at 640) onto the large canvas; bigger sources
/// fall back to the 320 cap.
fn filter_graph(double_small: bool) -> String {
    let (scale, pad) = if double_small {
        let small_source = format!("lte(iw,{UPSCALE_THRESHOLD})*lte(ih,{UPSCALE_THRESHOLD})");
        (
            format!(
                "scale=if({small_source},min({CANVAS_LARGE},iw*2),min({CANVAS_SMALL},iw)):\
                 if({small_source},min({CANVAS_LARGE},ih*2),min({CANVAS_SMALL},ih)):\
                 force_original_aspect_ratio=decrease"
            ),
            format!(
                "pad=if({small_source},{CANVAS_LARGE},{CANVAS_SMALL}):\
                 if({small_source},{CANVAS_LARGE},{CANVAS_SMALL}):-1:-1:color=white@0.0"
            ),
        )
    } else {
        (
            format!(
                "scale='min({CANVAS_SMALL},iw)':'min({CANVAS_SMALL},ih)':\
                 force_original_aspect_ratio=decrease"
            ),
            format!("pad={CANVAS_SMALL}:{CANVAS_SMALL}:-1:-1:color=white@0.0"),
        )
    };
    format!(
        "{scale},fps={STICKER_FPS},{pad},split [a][b]; \
         [a] palettegen=reserve_transparent=on:transparency_color=ffffff [p]; \
         [b][p] paletteuse"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_small_canvas() {
        let f = filter_graph(false);
        assert!(f.contains("pad=320:320:-1:-1:color=white@0.0"));
        assert!(f.contains("fps=15"));
        assert!(f.contains("palettegen=reserve_transparent=on"));
        assert!(!f.contains("640"));
    }

    #[test]
    fn filter_double_small_canvas() {
        let f = filter_graph(true);
        assert!(f.contains("min(640,iw*2)"));
        assert!(f.contains("force_original_aspect_ratio=decrease"));
        // Inclusive boundary: exactly-1280 sources take the 640 branch.
        assert!(f.contains("lte(iw,1280)*lte(ih,1280)"));
        assert!(!f.contains("lt(iw,1280)"));
    }

    #[tokio::test]
    async fn missing_ffmpeg_surfaces_error() {
        let transcoder = Transcoder::new("/nonexistent/ffmpeg");
        let err = transcoder.image_to_webp(b"not an image", false).await;
        assert!(err.is_err());
    }

    // Requires ffmpeg on PATH; run with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn transcode_failure_on_garbage_input() {
        let transcoder = Transcoder::default();
        let err = transcoder
            .image_to_webp(b"definitely not pixels", false)
            .await
            .unwrap_err();
        assert!(matches!(err, StickerError::Transcode(_)));
    }
}
