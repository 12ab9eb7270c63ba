// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Barcode integrity: check-digit computation, validation, and random
//! code generation for the two supported EAN symbologies.
//!
//! All functions are pure and synchronous; the only outside resource is
//! the random source, which callers can inject via
//! [`generate_barcode_with`].

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Supported linear barcode symbologies.
///
/// Serialized with the `"EAN13"`/`"EAN8"` tags stored in label records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarcodeSymbology {
    #[default]
    #[serde(rename = "EAN13")]
    Ean13,
    #[serde(rename = "EAN8")]
    Ean8,
}

impl BarcodeSymbology {
    /// Number of data digits, excluding the trailing check digit.
    pub fn data_len(&self) -> usize {
        match self {
            BarcodeSymbology::Ean13 => 12,
            BarcodeSymbology::Ean8 => 7,
        }
    }

    /// Full code length including the check digit.
    pub fn code_len(&self) -> usize {
        self.data_len() + 1
    }

    /// Stable tag used in persisted state.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeSymbology::Ean13 => "EAN13",
            BarcodeSymbology::Ean8 => "EAN8",
        }
    }

    /// Human-facing name for UI labels.
    pub fn display_name(&self) -> &'static str {
        match self {
            BarcodeSymbology::Ean13 => "EAN-13 (13 digits)",
            BarcodeSymbology::Ean8 => "EAN-8 (8 digits)",
        }
    }

    // GS1 weights the data digit next to the check digit with 3 and
    // alternates leftwards. Left-indexed, that lands on odd positions
    // for the 12-digit EAN-13 payload and on even positions for the
    // 7-digit EAN-8 payload. The parity flip between the two arms is
    // required by the standard, not an accident.
    fn weight(&self, position: usize) -> u32 {
        match self {
            BarcodeSymbology::Ean13 => {
                if position % 2 == 0 { 1 } else { 3 }
            }
            BarcodeSymbology::Ean8 => {
                if position % 2 == 0 { 3 } else { 1 }
            }
        }
    }
}

/// Compute the check digit for a payload of data digits.
///
/// `payload` must hold exactly [`BarcodeSymbology::data_len`] digits,
/// each in `0..=9`; shape enforcement is the caller's job (see
/// [`validate_barcode`] for the tolerant path).
pub fn compute_check_digit(payload: &[u8], symbology: BarcodeSymbology) -> u8 {
    debug_assert_eq!(payload.len(), symbology.data_len());

    let sum: u32 = payload
        .iter()
        .enumerate()
        .map(|(i, &digit)| u32::from(digit) * symbology.weight(i))
        .sum();

    ((10 - sum % 10) % 10) as u8
}

/// Generate a random, checksum-valid code using the thread-local RNG.
pub fn generate_barcode(symbology: BarcodeSymbology) -> String {
    generate_barcode_with(&mut rand::rng(), symbology)
}

/// Generate a random, checksum-valid code from a caller-supplied RNG.
///
/// Each data digit is drawn independently and uniformly from `0..=9`;
/// the matching check digit is appended. The result always satisfies
/// `validate_barcode(&code, symbology)`.
pub fn generate_barcode_with<R: Rng + ?Sized>(rng: &mut R, symbology: BarcodeSymbology) -> String {
    let payload: Vec<u8> = (0..symbology.data_len())
        .map(|_| rng.random_range(0..10u8))
        .collect();
    let check = compute_check_digit(&payload, symbology);

    let mut code = String::with_capacity(symbology.code_len());
    for digit in payload {
        code.push(char::from(b'0' + digit));
    }
    code.push(char::from(b'0' + check));
    code
}

/// Validate an arbitrary string against a symbology.
///
/// Total over all inputs: wrong length, non-digit characters,
/// whitespace, or signs yield `false` without touching the checksum.
/// The length and weighting rule come strictly from `symbology`; they
/// are never inferred from the string itself.
pub fn validate_barcode(code: &str, symbology: BarcodeSymbology) -> bool {
    if code.len() != symbology.code_len() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u8> = code.bytes().map(|b| b - b'0').collect();
    let (payload, check) = digits.split_at(symbology.data_len());

    compute_check_digit(payload, symbology) == check[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn digits(text: &str) -> Vec<u8> {
        text.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn check_digit_matches_published_gs1_vectors() {
        // EAN-13: 4006381333931 and EAN-8: 96385074 are textbook codes.
        assert_eq!(
            compute_check_digit(&digits("400638133393"), BarcodeSymbology::Ean13),
            1
        );
        assert_eq!(
            compute_check_digit(&digits("9638507"), BarcodeSymbology::Ean8),
            4
        );
        assert!(validate_barcode("4006381333931", BarcodeSymbology::Ean13));
        assert!(validate_barcode("96385074", BarcodeSymbology::Ean8));
    }

    #[test]
    fn check_digit_for_sample_payload() {
        // 7*1 + 8*3 + 9*1 + 1*3 + 2*1 + 3*3 + 4*1 + 5*3 + 6*1 + 7*3 + 8*1 + 9*3 = 135
        let payload = digits("789123456789");
        assert_eq!(compute_check_digit(&payload, BarcodeSymbology::Ean13), 5);
        assert!(validate_barcode("7891234567895", BarcodeSymbology::Ean13));
        assert!(!validate_barcode("7891234567890", BarcodeSymbology::Ean13));
    }

    #[test]
    fn check_digit_is_deterministic() {
        let payload = digits("789123456789");
        let first = compute_check_digit(&payload, BarcodeSymbology::Ean13);
        for _ in 0..10 {
            assert_eq!(compute_check_digit(&payload, BarcodeSymbology::Ean13), first);
        }
    }

    #[test]
    fn single_digit_change_flips_validation() {
        let code = "7891234567895";
        assert!(validate_barcode(code, BarcodeSymbology::Ean13));

        for position in 0..12 {
            let mut mutated: Vec<u8> = code.bytes().collect();
            mutated[position] = if mutated[position] == b'9' {
                b'0'
            } else {
                mutated[position] + 1
            };
            let mutated = String::from_utf8(mutated).unwrap();
            assert!(
                !validate_barcode(&mutated, BarcodeSymbology::Ean13),
                "mutation at {position} should invalidate"
            );
        }
    }

    #[test]
    fn validate_rejects_wrong_lengths() {
        assert!(!validate_barcode("123", BarcodeSymbology::Ean13));
        assert!(!validate_barcode("1234567890123456", BarcodeSymbology::Ean8));
        assert!(!validate_barcode("", BarcodeSymbology::Ean13));
        assert!(!validate_barcode("", BarcodeSymbology::Ean8));
    }

    #[test]
    fn validate_rejects_non_digits() {
        assert!(!validate_barcode("789123456789X", BarcodeSymbology::Ean13));
        assert!(!validate_barcode(" 7891234567895", BarcodeSymbology::Ean13));
        assert!(!validate_barcode("7891234567895 ", BarcodeSymbology::Ean13));
        assert!(!validate_barcode("+963850740123", BarcodeSymbology::Ean13));
        assert!(!validate_barcode("9638507४", BarcodeSymbology::Ean8));
    }

    #[test]
    fn validate_keys_strictly_off_the_passed_symbology() {
        // A valid EAN-8 code is not an EAN-13 code and vice versa, even
        // though both are well-formed digit strings.
        assert!(validate_barcode("96385074", BarcodeSymbology::Ean8));
        assert!(!validate_barcode("96385074", BarcodeSymbology::Ean13));
        assert!(validate_barcode("4006381333931", BarcodeSymbology::Ean13));
        assert!(!validate_barcode("4006381333931", BarcodeSymbology::Ean8));
    }

    #[test]
    fn generated_codes_round_trip_for_both_symbologies() {
        let mut rng = StdRng::seed_from_u64(0x1abe1);
        for symbology in [BarcodeSymbology::Ean13, BarcodeSymbology::Ean8] {
            for _ in 0..200 {
                let code = generate_barcode_with(&mut rng, symbology);
                assert_eq!(code.len(), symbology.code_len());
                assert!(
                    validate_barcode(&code, symbology),
                    "generated code {code} must validate"
                );
            }
        }
    }

    #[test]
    fn generator_covers_all_digits_in_every_position() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [[false; 10]; 12];

        for _ in 0..2000 {
            let code = generate_barcode_with(&mut rng, BarcodeSymbology::Ean13);
            for (position, byte) in code.bytes().take(12).enumerate() {
                seen[position][(byte - b'0') as usize] = true;
            }
        }

        for (position, row) in seen.iter().enumerate() {
            for (digit, was_seen) in row.iter().enumerate() {
                assert!(was_seen, "digit {digit} never generated at {position}");
            }
        }
    }

    #[test]
    fn symbology_tags_are_stable() {
        assert_eq!(BarcodeSymbology::Ean13.as_str(), "EAN13");
        assert_eq!(BarcodeSymbology::Ean8.as_str(), "EAN8");
        assert_eq!(
            serde_json::to_string(&BarcodeSymbology::Ean8).unwrap(),
            "\"EAN8\""
        );
        assert_eq!(
            serde_json::from_str::<BarcodeSymbology>("\"EAN13\"").unwrap(),
            BarcodeSymbology::Ean13
        );
    }
}
