use img_parts::webp::WebP;
use img_parts::{Bytes, ImageEXIF};
use serde::Deserialize;

use crate::error::Result;
use super::{EXIF_HEADER, PAYLOAD_LEN_OFFSET};

/// Sticker-pack descriptor read back from a finished sticker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackInfo {
    #[serde(rename = "sticker-pack-id")]
    pub pack_id: String,
    #[serde(rename = "sticker-pack-name")]
    pub pack_name: String,
    #[serde(rename = "sticker-pack-publisher")]
    pub publisher: String,
    pub emojis: Vec<String>,
    #[serde(rename = "is-avatar-sticker")]
    pub is_avatar: u8,
}

/// Read the sticker-pack descriptor from WebP sticker bytes.
///
/// Returns `Ok(None)` when the container carries no EXIF chunk or the
/// chunk is not a sticker descriptor (e.g. real photographic EXIF).
/// Container parse failures and malformed JSON payloads are errors.
pub fn read_sticker_exif(webp_bytes: &[u8]) -> Result<Option<PackInfo>> {
    let webp = WebP::from_bytes(Bytes::copy_from_slice(webp_bytes))?;

    let Some(exif) = webp.exif() else {
        log::debug!("WebP has no EXIF chunk");
        return Ok(None);
    };

    let Some(payload) = sticker_payload(&exif) else {
        log::debug!("EXIF chunk is not a sticker-pack descriptor");
        return Ok(None);
    };

    let info: PackInfo = serde_json::from_slice(payload)?;
    Ok(Some(info))
}

/// Extract the JSON payload from a sticker EXIF chunk, validating the
/// header shape and the length field against the actual payload size.
fn sticker_payload(exif: &[u8]) -> Option<&[u8]> {
    if exif.len() < EXIF_HEADER.len() {
        return None;
    }
    // The tag/type prefix must match the sticker header template.
    if exif[..PAYLOAD_LEN_OFFSET] != EXIF_HEADER[..PAYLOAD_LEN_OFFSET] {
        return None;
    }
    let declared = u32::from_le_bytes(
        exif[PAYLOAD_LEN_OFFSET..PAYLOAD_LEN_OFFSET + 4]
            .try_into()
            .ok()?,
    ) as usize;
    let payload = &exif[EXIF_HEADER.len()..];
    if declared != payload.len() {
        log::debug!(
            "EXIF length field {} does not match payload length {}",
            declared,
            payload.len()
        );
        return None;
    }
    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PackDefaults, StickerMetadata};
    use crate::exif::build_exif_chunk;

    #[test]
    fn payload_round_trip() {
        let meta = StickerMetadata {
            pack_name: Some("Test".into()),
            categories: Some(vec!["🔥".into()]),
            ..Default::default()
        };
        let chunk = build_exif_chunk(&meta, &PackDefaults::default());

        let payload = sticker_payload(&chunk).expect("payload should parse");
        let info: PackInfo = serde_json::from_slice(payload).unwrap();
        assert_eq!(info.pack_name, "Test");
        assert_eq!(info.publisher, "© Azrefta");
        assert_eq!(info.emojis, vec!["🔥".to_string()]);
        assert_eq!(info.is_avatar, 0);
    }

    #[test]
    fn rejects_truncated_chunk() {
        let chunk =
            build_exif_chunk(&StickerMetadata::default(), &PackDefaults::default());
        // Drop the last payload byte: the length field no longer matches.
        assert!(sticker_payload(&chunk[..chunk.len() - 1]).is_none());
    }

    #[test]
    fn rejects_foreign_exif() {
        // Big-endian TIFF header — real photographic EXIF, not a sticker.
        let foreign = b"MM\x00\x2a\x00\x00\x00\x08\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        assert!(sticker_payload(foreign).is_none());
    }

    #[test]
    fn rejects_short_input() {
        assert!(sticker_payload(b"II").is_none());
    }
}
