// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Timestamps as the API server writes them. Most responses carry RFC 3339
//! values, but older accounts were created with a plain `YYYY-MM-DD HH:MM:SS`
//! representation that is implicitly UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const NAIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, NAIVE_FORMAT)
                .ok()
                .map(|naive| naive.and_utc())
        })
}

pub(crate) fn serialize<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339())
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let value = String::deserialize(deserializer)?;
    parse(&value).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {value}")))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn parse_naive_as_utc() {
        assert_eq!(
            parse("2020-05-16 08:30:20"),
            Some(Utc.with_ymd_and_hms(2020, 5, 16, 8, 30, 20).unwrap()),
        );
    }

    #[test]
    fn parse_rfc3339_with_offset() {
        assert_eq!(
            parse("2020-05-16T10:30:20+02:00"),
            Some(Utc.with_ymd_and_hms(2020, 5, 16, 8, 30, 20).unwrap()),
        );
    }

    #[test]
    fn parse_garbage() {
        assert_eq!(parse("last tuesday"), None);
    }
}
