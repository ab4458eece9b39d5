//! Hex input for raw NFC payloads

/// Decode a hex dump of an NFC payload
///
/// Whitespace and `:` separators are ignored, so `02 65 6e` and `02:65:6e`
/// are both accepted.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("02656e", vec![0x02, 0x65, 0x6e])]
    #[case("02 65 6E", vec![0x02, 0x65, 0x6e])]
    #[case("02:65:6e", vec![0x02, 0x65, 0x6e])]
    #[case(" 02656e\n", vec![0x02, 0x65, 0x6e])]
    #[case("", vec![])]
    fn test_decode_hex(#[case] input: &str, #[case] expected: Vec<u8>) {
        assert_eq!(decode_hex(input).unwrap(), expected);
    }

    #[rstest]
    #[case("abc", hex::FromHexError::OddLength)]
    #[case("zz", hex::FromHexError::InvalidHexCharacter { c: 'z', index: 0 })]
    fn test_decode_hex_errors(#[case] input: &str, #[case] expected: hex::FromHexError) {
        assert_eq!(decode_hex(input), Err(expected));
    }
}
