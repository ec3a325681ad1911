use std::io;

/// Errors produced while building a sticker.
///
/// There are no internal retries anywhere in this crate: every failure is
/// surfaced to the immediate caller, who owns retry policy and user-facing
/// messaging. Temporary files are cleaned up on every path regardless.
#[derive(Debug, thiserror::Error)]
pub enum StickerError {
    /// The external transcoder exited abnormally or produced no output.
    #[error("transcoder failed: {0}")]
    Transcode(String),

    /// The intermediate WebP could not be parsed or rewritten.
    #[error("failed to read WebP container: {0}")]
    ContainerParse(#[from] img_parts::Error),

    /// MIME type matched none of `webp`, `image/*`, `video/*`.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Temporary file or subprocess I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Sticker metadata payload could not be (de)serialized.
    #[error("invalid sticker metadata payload: {0}")]
    Metadata(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StickerError>;
