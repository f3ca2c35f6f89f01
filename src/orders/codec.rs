//! Order-number codec: a pure, total, round-tripping transform from an
//! order id to the human-facing reference printed on receipts.

use base32::Alphabet;

const PREFIX: &str = "DV-";
const ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };

pub fn encode_order_number(id: i64) -> String {
    let digits = id.to_string();
    format!("{PREFIX}{}", base32::encode(ALPHABET, digits.as_bytes()))
}

pub fn decode_order_number(number: &str) -> Option<i64> {
    let encoded = number.strip_prefix(PREFIX)?;
    let bytes = base32::decode(ALPHABET, encoded)?;
    let digits = String::from_utf8(bytes).ok()?;
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_ids() {
        for id in [0_i64, 1, 42, 123456789, i64::MAX] {
            let encoded = encode_order_number(id);
            assert!(encoded.starts_with(PREFIX));
            assert_eq!(decode_order_number(&encoded), Some(id));
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(decode_order_number("not-an-order-number"), None);
        assert_eq!(decode_order_number("DV-"), None);
    }
}
