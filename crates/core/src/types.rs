/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Serde helpers for incoming timestamps.
///
/// Accepts RFC 3339 (`2024-06-01T12:00:00Z`, `...+02:00`) and offset-less
/// ISO 8601 (`2024-06-01T12:00:00.123456`), the latter read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    use super::Timestamp;

    /// Parse a wire timestamp.
    pub fn parse(value: &str) -> Result<Timestamp, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(value) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(err) => value
                .parse::<NaiveDateTime>()
                .map(|naive| naive.and_utc())
                .map_err(|_| err),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// For optional patch fields; pair with `#[serde(default)]`.
    pub mod option {
        use serde::{Deserialize, Deserializer};

        use super::super::Timestamp;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| super::parse(&raw).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
