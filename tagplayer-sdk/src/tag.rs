//! Decoding scanned QR codes and NFC records into media identifiers

use tagplayer_api::MediaIdentifier;

use crate::SdkError;

/// Framing bytes at the start of an NFC text record payload
///
/// One status byte followed by a two-letter language code.
pub const NFC_FRAMING_BYTES: usize = 3;

/// Raw data read from a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPayload {
    /// Decoded QR code text
    Qr(String),
    /// Payload bytes of an NFC text record, framing included
    Nfc(Vec<u8>),
}

impl TagPayload {
    /// Turn the payload into a media identifier
    pub fn decode(&self) -> Result<MediaIdentifier, SdkError> {
        match self {
            TagPayload::Qr(text) => MediaIdentifier::new(text.as_str())
                .map_err(|_| SdkError::InvalidTag("QR code is empty".to_string())),
            TagPayload::Nfc(bytes) => decode_nfc(bytes),
        }
    }
}

/// Decode the first record of an NDEF message
///
/// Only the first record is used; the rest are ignored.
pub fn decode_ndef_records(records: &[Vec<u8>]) -> Result<MediaIdentifier, SdkError> {
    let first = records
        .first()
        .ok_or_else(|| SdkError::InvalidTag("NDEF message has no records".to_string()))?;
    decode_nfc(first)
}

fn decode_nfc(bytes: &[u8]) -> Result<MediaIdentifier, SdkError> {
    let text = bytes.get(NFC_FRAMING_BYTES..).ok_or_else(|| {
        SdkError::InvalidTag(format!(
            "NFC payload has {} bytes, expected more than {}",
            bytes.len(),
            NFC_FRAMING_BYTES
        ))
    })?;

    let text = std::str::from_utf8(text)
        .map_err(|e| SdkError::InvalidTag(format!("NFC payload is not UTF-8: {}", e)))?;

    MediaIdentifier::new(text)
        .map_err(|_| SdkError::InvalidTag("NFC payload is empty".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_record(text: &str) -> Vec<u8> {
        let mut bytes = vec![0x02, b'e', b'n'];
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }

    #[test]
    fn test_qr_payload() {
        let identifier = TagPayload::Qr(" spotify:track:ABC123\n".to_string())
            .decode()
            .unwrap();
        assert_eq!(identifier.as_str(), "spotify:track:ABC123");
    }

    #[test]
    fn test_empty_qr_payload() {
        let result = TagPayload::Qr(String::new()).decode();
        assert!(matches!(result, Err(SdkError::InvalidTag(_))));
    }

    #[test]
    fn test_nfc_strips_framing() {
        let identifier = TagPayload::Nfc(text_record("spotify:album:XYZ"))
            .decode()
            .unwrap();
        assert_eq!(identifier.as_str(), "spotify:album:XYZ");
    }

    #[test]
    fn test_nfc_too_short() {
        assert!(matches!(
            TagPayload::Nfc(vec![0x02, b'e']).decode(),
            Err(SdkError::InvalidTag(_))
        ));
        // Framing only, no text
        assert!(matches!(
            TagPayload::Nfc(vec![0x02, b'e', b'n']).decode(),
            Err(SdkError::InvalidTag(_))
        ));
    }

    #[test]
    fn test_nfc_invalid_utf8() {
        let result = TagPayload::Nfc(vec![0x02, b'e', b'n', 0xff, 0xfe]).decode();
        assert!(matches!(result, Err(SdkError::InvalidTag(_))));
    }

    #[test]
    fn test_ndef_uses_first_record() {
        let records = vec![text_record("spotify:track:FIRST"), text_record("spotify:track:SECOND")];
        let identifier = decode_ndef_records(&records).unwrap();
        assert_eq!(identifier.as_str(), "spotify:track:FIRST");

        assert!(decode_ndef_records(&[]).is_err());
    }
}
