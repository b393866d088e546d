//! Booking reference generation.
//!
//! References are short, human-readable, and sparse enough that no
//! uniqueness check happens at generation time. The persistence layer
//! carries a unique constraint and the submission pipeline retries on
//! collision.

use chrono::{NaiveDate, Utc};
use rand::Rng;

/// Prefix for every booking reference.
pub const REFERENCE_PREFIX: &str = "BK";

/// Length of the random suffix.
pub const SUFFIX_LENGTH: usize = 4;

/// Generate a reference of the form `BK-<YYYYMMDD>-<4 uppercase
/// alphanumeric>` for the current UTC date.
///
/// The suffix is sampled from the thread-local CSPRNG.
pub fn generate_reference() -> String {
    reference_for_date(Utc::now().date_naive())
}

/// Generate a reference for a specific date. Split out so tests can pin
/// the date segment.
pub fn reference_for_date(date: NaiveDate) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SUFFIX_LENGTH)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();

    format!("{REFERENCE_PREFIX}-{}-{suffix}", date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn reference_matches_documented_shape() {
        let re = Regex::new(r"^BK-\d{8}-[A-Z0-9]{4}$").unwrap();
        for _ in 0..50 {
            let reference = generate_reference();
            assert!(re.is_match(&reference), "bad reference {reference:?}");
        }
    }

    #[test]
    fn date_segment_uses_given_date() {
        let date = NaiveDate::from_ymd_opt(2031, 6, 15).unwrap();
        let reference = reference_for_date(date);
        assert!(reference.starts_with("BK-20310615-"));
    }

    #[test]
    fn suffixes_vary() {
        let date = NaiveDate::from_ymd_opt(2031, 6, 15).unwrap();
        let a = reference_for_date(date);
        let b = reference_for_date(date);
        let c = reference_for_date(date);
        // Three identical draws from a 36^4 space would indicate a broken RNG.
        assert!(!(a == b && b == c), "suffixes did not vary: {a}");
    }
}
