//! BCD pixel decoding.
//!
//! Each stamp pixel packs two decimal digits, one per nibble. The digit
//! string across the leading pixels reads `IIIIIIIIYYYYMMDDHHMMSSffff...`:
//! an 8-digit frame index followed by the acquisition time.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use crate::pco_image::common::error::{PcoError, Result};
use crate::pco_image::stamp::types::{ImageStamp, StampMode};

/// Leading digits holding the frame index.
const INDEX_DIGITS: usize = 8;

/// Longest timestamp field: `YYYYMMDDHHMMSS` plus four fraction digits.
const TIMESTAMP_DIGITS: usize = 18;

/// Digits of the whole-second part, `YYYYMMDDHHMMSS`.
const DATE_TIME_DIGITS: usize = 14;

/// Fraction digits are left-aligned microseconds, at most six of them.
const MICROS_DIGITS: usize = 6;

/// Decodes one BCD stamp pixel into its two decimal digits.
///
/// With `shift_mode` the pixel is a 14-bit sensor value stored left-shifted
/// by 2 bits inside the 16-bit container; dropping the low 2 bits recovers
/// the BCD byte. Without it the pixel is taken as the BCD byte directly.
///
/// A nibble above 9 is not a decimal digit and fails with
/// [`PcoError::InvalidBcdDigit`] right here, rather than producing a garbled
/// digit string that only fails later at timestamp parsing.
pub fn decode_digit_pair(pixel: u16, shift_mode: bool) -> Result<[u8; 2]> {
    let value = if shift_mode { pixel >> 2 } else { pixel };
    let hi = value >> 4;
    let lo = value & 0x0F;
    // hi covers everything above the low nibble, so an out-of-range pixel
    // (wider than the 8-bit BCD byte) is rejected here as well.
    if hi > 9 {
        return Err(PcoError::InvalidBcdDigit { pixel, nibble: hi });
    }
    if lo > 9 {
        return Err(PcoError::InvalidBcdDigit { pixel, nibble: lo });
    }
    Ok([hi as u8, lo as u8])
}

/// Decodes the frame index and timestamp from the leading stamp pixels.
///
/// The digit pairs of all `pixels` are concatenated in order; the first 8
/// characters are the frame index, the following up to 18 characters the
/// timestamp field. In [`StampMode::Raw`] the two substrings are returned
/// untouched, however short or nonsensical; callers probing unknown frames
/// rely on that pass-through. In [`StampMode::Parsed`] the timestamp must
/// form a real calendar date-time with microsecond precision.
pub fn decode_stamp(pixels: &[u16], shift_mode: bool, mode: StampMode) -> Result<ImageStamp> {
    let mut digits = String::with_capacity(pixels.len() * 2);
    for &pixel in pixels {
        let [hi, lo] = decode_digit_pair(pixel, shift_mode)?;
        digits.push(char::from(b'0' + hi));
        digits.push(char::from(b'0' + lo));
    }

    let split = digits.len().min(INDEX_DIGITS);
    let index = &digits[..split];
    let timestamp = &digits[split..digits.len().min(INDEX_DIGITS + TIMESTAMP_DIGITS)];
    debug!(index, timestamp, "decoded stamp digits");

    match mode {
        StampMode::Raw => Ok(ImageStamp::Raw {
            index: index.to_string(),
            timestamp: timestamp.to_string(),
        }),
        StampMode::Parsed => {
            let timestamp = parse_timestamp(timestamp)?;
            let index = index.parse::<u32>().map_err(|e| PcoError::TimestampParse {
                value: digits.clone(),
                reason: format!("frame index '{index}' is not an integer ({e})"),
            })?;
            Ok(ImageStamp::Parsed { index, timestamp })
        }
    }
}

/// Parses `YYYYMMDDHHMMSS` plus up to six fraction digits. Shorter fraction
/// fields are right-padded with zeros, so "0963" means 96300 microseconds.
fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    if value.len() < DATE_TIME_DIGITS {
        return Err(PcoError::TimestampParse {
            value: value.to_string(),
            reason: format!(
                "timestamp field has {} digits, need at least {DATE_TIME_DIGITS}",
                value.len()
            ),
        });
    }

    let (whole, fraction) = value.split_at(DATE_TIME_DIGITS);
    let base =
        NaiveDateTime::parse_from_str(whole, "%Y%m%d%H%M%S").map_err(|e| PcoError::TimestampParse {
            value: value.to_string(),
            reason: e.to_string(),
        })?;

    let fraction = &fraction[..fraction.len().min(MICROS_DIGITS)];
    let micros = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<6}")
            .parse::<i64>()
            .map_err(|e| PcoError::TimestampParse {
                value: value.to_string(),
                reason: format!("fraction digits '{fraction}' are not an integer ({e})"),
            })?
    };

    Ok(base + TimeDelta::microseconds(micros))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn encode_digits(digits: &str, shift_mode: bool) -> Vec<u16> {
        digits
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                let byte = (u16::from(pair[0] - b'0') << 4) | u16::from(pair[1] - b'0');
                if shift_mode { byte << 2 } else { byte }
            })
            .collect()
    }

    #[test]
    fn digit_pair_without_shift() {
        assert_eq!(decode_digit_pair(0x42, false).unwrap(), [4, 2]);
        assert_eq!(decode_digit_pair(0x09, false).unwrap(), [0, 9]);
    }

    #[test]
    fn digit_pair_with_shift() {
        // 0x42 << 2: a 14-bit value saved into a 16-bit file
        assert_eq!(decode_digit_pair(0x42 << 2, true).unwrap(), [4, 2]);
        assert_eq!(decode_digit_pair(0x99 << 2, true).unwrap(), [9, 9]);
    }

    #[test]
    fn invalid_nibble_fails_fast() {
        let err = decode_digit_pair(0x4A, false).unwrap_err();
        assert!(matches!(err, PcoError::InvalidBcdDigit { nibble: 10, .. }));

        let err = decode_digit_pair(0xA4, false).unwrap_err();
        assert!(matches!(err, PcoError::InvalidBcdDigit { nibble: 10, .. }));

        // wider than the 8-bit BCD byte
        let err = decode_digit_pair(0x1234, false).unwrap_err();
        assert!(matches!(err, PcoError::InvalidBcdDigit { .. }));
    }

    #[test]
    fn index_round_trips() {
        for index in [0u32, 1, 42, 1_234_567, 99_999_999] {
            let digits = format!("{index:08}");
            let pixels = encode_digits(&digits, true);
            let stamp = decode_stamp(&pixels, true, StampMode::Raw).unwrap();
            match stamp {
                ImageStamp::Raw { index: decoded, .. } => {
                    assert_eq!(decoded.parse::<u32>().unwrap(), index)
                }
                other => panic!("expected raw stamp, got {other:?}"),
            }
        }
    }

    #[test]
    fn parsed_stamp_round_trips() {
        // 14 pixels: 8-digit index plus 20 timestamp digits, of which the
        // first 18 are significant
        let digits = "0000000120230120182153096300";
        let pixels = encode_digits(digits, true);

        let stamp = decode_stamp(&pixels, true, StampMode::Parsed).unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 1, 20)
            .unwrap()
            .and_hms_micro_opt(18, 21, 53, 96_300)
            .unwrap();
        assert_eq!(
            stamp,
            ImageStamp::Parsed {
                index: 1,
                timestamp: expected
            }
        );
    }

    #[test]
    fn parsed_stamp_without_shift() {
        let digits = "0004223320230214230520754900";
        let pixels = encode_digits(digits, false);

        let stamp = decode_stamp(&pixels, false, StampMode::Parsed).unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 2, 14)
            .unwrap()
            .and_hms_micro_opt(23, 5, 20, 754_900)
            .unwrap();
        assert_eq!(stamp.index(), Some(42233));
        assert_eq!(stamp.timestamp(), Some(expected));
    }

    #[test]
    fn raw_mode_skips_validation() {
        // month 99 is no calendar date, raw mode hands it through anyway
        let digits = "9999999999999999999999999999";
        let pixels = encode_digits(digits, true);

        let stamp = decode_stamp(&pixels, true, StampMode::Raw).unwrap();
        match stamp {
            ImageStamp::Raw { index, timestamp } => {
                assert_eq!(index.len(), 8);
                assert_eq!(timestamp.len(), 18);
            }
            other => panic!("expected raw stamp, got {other:?}"),
        }

        let err = decode_stamp(&pixels, true, StampMode::Parsed).unwrap_err();
        assert!(matches!(err, PcoError::TimestampParse { .. }));
    }

    #[test]
    fn too_few_pixels_is_a_parse_error() {
        // 5 pixels leave only 2 digits of timestamp
        let pixels = encode_digits("0000000153", true);
        let err = decode_stamp(&pixels, true, StampMode::Parsed).unwrap_err();
        match err {
            PcoError::TimestampParse { reason, .. } => {
                assert!(reason.contains("2 digits"), "unexpected reason: {reason}")
            }
            other => panic!("expected TimestampParse, got {other:?}"),
        }
    }

    #[test]
    fn fraction_is_right_padded_to_microseconds() {
        // 13 pixels: only 3 fraction digits survive
        let digits = "00000001202301201821530963";
        let pixels = encode_digits(digits, true);

        let stamp = decode_stamp(&pixels, true, StampMode::Parsed).unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 1, 20)
            .unwrap()
            .and_hms_micro_opt(18, 21, 53, 96_300)
            .unwrap();
        assert_eq!(stamp.timestamp(), Some(expected));
    }
}
