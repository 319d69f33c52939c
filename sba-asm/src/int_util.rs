//! Literal-to-word conversion helpers for the low-level line parser
//! (spec §4.3 items 2-4). Grounded on `vasm/src/int_util.rs`'s
//! generic-numeric-parsing approach, simplified to the low-level SBA
//! grammar: plain signed decimal integers and decimal floats only (no
//! `0x`/`0o`/`0b` prefixes — those belong to the higher-level front end
//! that spec §2 places out of scope).

/// Parses a signed decimal integer token into its two's-complement
/// 32-bit word (spec §4.3 item 2, §8 boundary scenario 4).
pub fn parse_signed_int_word(token: &str) -> Option<u32> {
    token.parse::<i32>().ok().map(|value| value as u32)
}

/// Parses a decimal floating-point token into its IEEE-754 32-bit bit
/// pattern (spec §4.3 item 3). Tried only after `parse_signed_int_word`
/// has already failed, so there is no ambiguity between the two: a
/// token that parses as an integer is always classified as one first.
pub fn parse_float_word(token: &str) -> Option<u32> {
    token.parse::<f32>().ok().map(f32::to_bits)
}

/// Packs a string literal's contents into NUL-terminated, NUL-padded
/// 32-bit words (spec §4.3 item 4, §6, §8 boundary scenario 3). Always
/// emits at least one word, and always ends on a word containing at
/// least one NUL byte — including an entirely-zero trailing word when
/// the content's length is an exact multiple of four.
pub fn pack_string(text: &str) -> Vec<u32> {
    let bytes = text.as_bytes();
    let mut words = Vec::with_capacity(bytes.len() / 4 + 1);
    let mut offset = 0;

    loop {
        let remaining = bytes.len() - offset;
        if remaining == 0 {
            words.push(0);
            break;
        }
        let take = remaining.min(4);
        let mut chunk = [0u8; 4];
        chunk[..take].copy_from_slice(&bytes[offset..offset + take]);
        words.push(u32::from_le_bytes(chunk));
        offset += take;
        if take < 4 {
            break;
        }
    }

    words
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn negative_one_is_all_ones() {
        assert_eq!(parse_signed_int_word("-1"), Some(0xFFFF_FFFF));
    }

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(parse_signed_int_word("0"), Some(0));
    }

    #[test]
    fn non_numeric_token_is_not_an_int() {
        assert_eq!(parse_signed_int_word("Shader"), None);
    }

    #[test]
    fn float_token_round_trips_through_bit_pattern() {
        let word = parse_float_word("1.5").unwrap();
        assert_eq!(f32::from_bits(word), 1.5f32);
    }

    #[test]
    fn two_byte_string_packs_into_one_padded_word() {
        let words = pack_string("ab");
        assert_eq!(words, vec![0x0000_6261]);
    }

    #[test]
    fn four_byte_string_gets_a_trailing_all_zero_word() {
        let words = pack_string("abcd");
        assert_eq!(words, vec![0x6463_6261, 0x0000_0000]);
    }

    #[test]
    fn empty_string_packs_to_a_single_zero_word() {
        assert_eq!(pack_string(""), vec![0]);
    }
}
