//! WhatsApp sticker-pack EXIF chunk construction and inspection.
//!
//! WhatsApp (ab)uses the WebP EXIF chunk to carry a JSON sticker-pack
//! descriptor rather than photographic metadata. This module provides:
//!
//! - [`build_exif_chunk`] — serialize metadata into the fixed-format chunk
//! - [`read_sticker_exif`] — pull the descriptor back out of sticker bytes
//!
//! The chunk is a 22-byte TIFF-style header followed by a UTF-8 JSON
//! payload; header bytes 14..18 hold the payload byte length as a
//! little-endian u32. Consuming clients reject stickers where that length
//! field does not match the payload exactly.

mod chunk;
mod reader;

pub use chunk::build_exif_chunk;
pub use reader::{read_sticker_exif, PackInfo};

pub(crate) use chunk::{EXIF_HEADER, PAYLOAD_LEN_OFFSET};
