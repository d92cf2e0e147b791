//! Post identifier decoding.
//!
//! Feed permalinks carry a 19-digit activity identifier. Its binary form
//! starts with the creation time in milliseconds since the Unix epoch: the
//! leading 41 bits, with sequence and machine bits below. Nineteen decimal
//! digits exceed the 53-bit range of an `f64`, so all arithmetic here is
//! on `u64`.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};

use crate::patterns::{DATE_ZONE_SEPARATOR, POST_ID_DIGITS};

/// Number of leading bits holding the epoch-millisecond timestamp.
pub const TIMESTAMP_BITS: u32 = 41;

/// A 19-digit activity identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(u64);

impl PostId {
    /// First 19-digit run in `url`, if any.
    #[must_use]
    pub fn find_in(url: &str) -> Option<Self> {
        POST_ID_DIGITS
            .find(url)
            .and_then(|m| m.as_str().parse().ok())
            .map(Self)
    }

    /// The identifier as an integer.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Creation time in epoch milliseconds.
    #[must_use]
    pub fn timestamp_millis(self) -> u64 {
        decode_timestamp(self.0)
    }

    /// Creation time as a UTC instant.
    #[must_use]
    pub fn created_at(self) -> Option<DateTime<Utc>> {
        millis_to_utc(self.timestamp_millis())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extract the 19-digit identifier from a permalink.
#[must_use]
pub fn extract_identifier(url: &str) -> Option<PostId> {
    PostId::find_in(url)
}

/// Read the leading 41 bits of `id`'s binary representation.
///
/// The representation has no leading zeros, so the shift depends on the
/// identifier's bit length. Identifiers shorter than 41 bits are returned
/// whole.
#[must_use]
pub fn decode_timestamp(id: u64) -> u64 {
    let width = u64::BITS - id.leading_zeros();
    if width > TIMESTAMP_BITS {
        id >> (width - TIMESTAMP_BITS)
    } else {
        id
    }
}

fn millis_to_utc(millis: u64) -> Option<DateTime<Utc>> {
    i64::try_from(millis).ok().and_then(DateTime::from_timestamp_millis)
}

/// Timezone used to render `datePost`: a display name plus the offset rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayZone {
    name: String,
    // None follows the system zone, including its DST changes.
    fixed: Option<FixedOffset>,
}

impl DisplayZone {
    /// The system timezone, named by its IANA identifier.
    ///
    /// Falls back to the name "UTC" when the platform does not report one;
    /// offsets still come from the system clock.
    #[must_use]
    pub fn local() -> Self {
        let name = iana_time_zone::get_timezone().unwrap_or_else(|err| {
            tracing::debug!("local timezone name unavailable: {err}");
            "UTC".to_string()
        });
        Self { name, fixed: None }
    }

    /// A constant offset with the given display name.
    #[must_use]
    pub fn fixed(name: impl Into<String>, offset: FixedOffset) -> Self {
        Self {
            name: name.into(),
            fixed: Some(offset),
        }
    }

    /// Coordinated Universal Time.
    #[must_use]
    pub fn utc() -> Self {
        Self::fixed("UTC", Utc.fix())
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self.fixed {
            Some(offset) => offset,
            None => instant.with_timezone(&Local).offset().fix(),
        }
    }
}

/// Render epoch milliseconds as e.g.
/// `Tue, 2023-11-14 @ 5:13 PM<br />America/New_York (GMT-5)`.
///
/// Offsets that are not whole hours print as decimals (`GMT+5.5`).
/// Returns an empty string for instants chrono cannot represent.
#[must_use]
pub fn format_human_date(millis: u64, zone: &DisplayZone) -> String {
    let Some(instant) = millis_to_utc(millis) else {
        return String::new();
    };

    let offset = zone.offset_at(&instant);
    let local = instant.with_timezone(&offset);
    let offset_minutes = offset.local_minus_utc() / 60;
    let sign = if offset_minutes < 0 { '-' } else { '+' };

    format!(
        "{} @ {}{DATE_ZONE_SEPARATOR}{} (GMT{sign}{})",
        local.format("%a, %Y-%m-%d"),
        local.format("%-I:%M %p"),
        zone.name(),
        offset_hours(offset_minutes),
    )
}

fn offset_hours(offset_minutes: i32) -> String {
    let minutes = offset_minutes.unsigned_abs();
    if minutes % 60 == 0 {
        (minutes / 60).to_string()
    } else {
        (f64::from(minutes) / 60.0).to_string()
    }
}

/// `datePost` for a permalink; empty when it carries no identifier.
#[must_use]
pub fn date_for_permalink(url: &str, zone: &DisplayZone) -> String {
    extract_identifier(url)
        .map(|id| format_human_date(id.timestamp_millis(), zone))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    // 1_700_000_000_000 ms (2023-11-14 22:13:20 UTC) shifted past 22 low bits.
    const KNOWN_ID: u64 = 7_130_316_800_000_012_345;
    const KNOWN_MILLIS: u64 = 1_700_000_000_000;

    #[test]
    fn finds_identifier_in_permalink() {
        let url = "https://www.linkedin.com/feed/update/urn:li:activity:7130316800000012345";
        assert_eq!(extract_identifier(url).map(PostId::value), Some(KNOWN_ID));
    }

    #[test]
    fn short_digit_runs_are_not_identifiers() {
        assert!(extract_identifier("https://example.com/posts/123456789").is_none());
        assert!(extract_identifier("").is_none());
    }

    #[test]
    fn decodes_leading_41_bits() {
        assert_eq!(decode_timestamp(KNOWN_ID), KNOWN_MILLIS);
        assert_eq!(decode_timestamp(7_123_456_789_012_345_678), 1_698_364_445_927);
    }

    #[test]
    fn narrow_identifiers_are_used_whole() {
        assert_eq!(decode_timestamp(0), 0);
        assert_eq!(decode_timestamp(12_345), 12_345);
        assert_eq!(decode_timestamp((1 << 41) - 1), (1 << 41) - 1);
    }

    #[test]
    fn decoding_is_monotonic_for_same_width_ids() {
        let ids = [
            7_000_000_000_000_000_000_u64,
            7_130_316_800_000_012_345,
            7_130_316_800_000_012_346,
            7_200_000_000_000_000_000,
            9_223_372_036_854_775_807,
        ];
        for pair in ids.windows(2) {
            assert!(decode_timestamp(pair[0]) <= decode_timestamp(pair[1]));
        }
    }

    #[test]
    fn created_at_matches_known_instant() {
        let id = PostId::find_in("7130316800000012345").unwrap();
        assert_eq!(id.created_at().map(|t| t.timestamp()), Some(1_700_000_000));
        assert_eq!(id.to_string(), "7130316800000012345");
    }

    #[test]
    fn formats_utc() {
        assert_eq!(
            format_human_date(KNOWN_MILLIS, &DisplayZone::utc()),
            "Tue, 2023-11-14 @ 10:13 PM<br />UTC (GMT+0)"
        );
    }

    #[test]
    fn formats_west_of_utc_with_minus() {
        let zone = DisplayZone::fixed("America/New_York", FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(
            format_human_date(KNOWN_MILLIS, &zone),
            "Tue, 2023-11-14 @ 5:13 PM<br />America/New_York (GMT-5)"
        );
    }

    #[test]
    fn formats_fractional_offsets() {
        let zone = DisplayZone::fixed("Asia/Kolkata", FixedOffset::east_opt(5 * 3600 + 1800).unwrap());
        assert_eq!(
            format_human_date(KNOWN_MILLIS, &zone),
            "Wed, 2023-11-15 @ 3:43 AM<br />Asia/Kolkata (GMT+5.5)"
        );
        assert_eq!(offset_hours(345), "5.75");
        assert_eq!(offset_hours(-60), "1");
    }

    #[test]
    fn permalink_without_identifier_has_empty_date() {
        assert_eq!(date_for_permalink("", &DisplayZone::utc()), "");
        assert_eq!(
            date_for_permalink("https://www.linkedin.com/feed/update/urn:li:activity:42", &DisplayZone::utc()),
            ""
        );
    }

    #[test]
    fn local_zone_has_a_name() {
        assert!(!DisplayZone::local().name().is_empty());
    }
}
