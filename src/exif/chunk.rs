use serde::Serialize;

use crate::config::{PackDefaults, StickerMetadata};

/// Fixed 22-byte TIFF-style header preceding the JSON payload.
///
/// Little-endian TIFF ("II", magic 42), one IFD entry with tag 0x5741
/// ("AW"), type UNDEFINED, data at offset 22. Bytes 14..18 are the
/// component count field and get patched to the payload byte length.
pub(crate) const EXIF_HEADER: [u8; 22] = [
    0x49, 0x49, 0x2A, 0x00, // "II" + TIFF magic
    0x08, 0x00, 0x00, 0x00, // IFD0 offset
    0x01, 0x00, // entry count: 1
    0x41, 0x57, // tag "AW"
    0x07, 0x00, // type: UNDEFINED
    0x00, 0x00, 0x00, 0x00, // component count — patched to payload length
    0x16, 0x00, 0x00, 0x00, // value offset: 22
];

/// Offset of the little-endian u32 payload-length field within the header.
pub(crate) const PAYLOAD_LEN_OFFSET: usize = 14;

/// The JSON payload WhatsApp clients parse out of the EXIF chunk.
///
/// Key names and ordering are fixed; some consumers parse positionally.
#[derive(Serialize)]
struct PackDescriptor<'a> {
    #[serde(rename = "sticker-pack-id")]
    pack_id: &'a str,
    #[serde(rename = "sticker-pack-name")]
    pack_name: &'a str,
    #[serde(rename = "sticker-pack-publisher")]
    publisher: &'a str,
    emojis: &'a [String],
    #[serde(rename = "is-avatar-sticker")]
    is_avatar: u8,
}

/// Build the binary EXIF chunk for a sticker.
///
/// Fields absent from `metadata` fall back to `defaults`; caller-supplied
/// values — including explicit empty strings — are used as-is. The pack id
/// always carries the default author, matching what WhatsApp pack tools
/// emit. `emojis` is always a list, even for a single category.
///
/// This operation is pure and allocation-only: plain strings and integers
/// cannot fail to serialize, so there is no error path.
///
/// # Example
///
/// ```rust
/// use sticker_exif::config::{PackDefaults, StickerMetadata};
/// use sticker_exif::exif::build_exif_chunk;
///
/// let chunk = build_exif_chunk(&StickerMetadata::default(), &PackDefaults::default());
/// let payload_len = u32::from_le_bytes(chunk[14..18].try_into().unwrap());
/// assert_eq!(payload_len as usize, chunk.len() - 22);
/// ```
pub fn build_exif_chunk(metadata: &StickerMetadata, defaults: &PackDefaults) -> Vec<u8> {
    let default_categories = [String::new()];
    let descriptor = PackDescriptor {
        pack_id: &defaults.author,
        pack_name: metadata.pack_name.as_deref().unwrap_or(&defaults.pack_name),
        publisher: metadata.author.as_deref().unwrap_or(&defaults.author),
        emojis: metadata
            .categories
            .as_deref()
            .unwrap_or(default_categories.as_slice()),
        is_avatar: metadata.is_avatar.unwrap_or(0),
    };

    let payload =
        serde_json::to_vec(&descriptor).expect("descriptor serialization is infallible");

    let mut chunk = Vec::with_capacity(EXIF_HEADER.len() + payload.len());
    chunk.extend_from_slice(&EXIF_HEADER);
    chunk.extend_from_slice(&payload);

    let len = (payload.len() as u32).to_le_bytes();
    chunk[PAYLOAD_LEN_OFFSET..PAYLOAD_LEN_OFFSET + 4].copy_from_slice(&len);

    chunk
}
