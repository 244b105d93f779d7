//! Reservation model

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    #[default]
    New,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ReservationStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownStatus(value))
    }
}

/// Stored status text outside the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reservation status: {0}")]
pub struct UnknownStatus(pub String);

/// Minimum and maximum party size
pub const PARTY_SIZE_RANGE: std::ops::RangeInclusive<i32> = 1..=30;

/// Table reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub full_name: String,
    pub phone: String,
    pub people: i32,
    #[serde(with = "minute_format")]
    pub reserved_at: NaiveDateTime,
    pub notes: Option<String>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: ReservationStatus,
}

/// Create reservation payload (already validated)
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationCreate {
    pub full_name: String,
    pub phone: String,
    pub people: i32,
    pub reserved_at: NaiveDateTime,
    pub notes: Option<String>,
}

/// Result of a status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationStatusChange {
    pub id: i64,
    pub status: ReservationStatus,
}

/// `YYYY-MM-DD HH:MM` wire format for reservation times
pub mod minute_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_parse() {
        assert_eq!(ReservationStatus::parse("confirmed"), Some(ReservationStatus::Confirmed));
        assert_eq!(ReservationStatus::parse("Confirmed"), None);
        assert!(ReservationStatus::try_from("done".to_string()).is_err());
    }

    #[test]
    fn test_reserved_at_wire_format() {
        let r = Reservation {
            id: 1,
            created_at: Utc::now(),
            full_name: "Mario".into(),
            phone: "333".into(),
            people: 4,
            reserved_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(20, 0, 0)
                .unwrap(),
            notes: None,
            status: ReservationStatus::New,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["reserved_at"], "2024-01-01 20:00");
        assert_eq!(json["status"], "new");

        let back: Reservation = serde_json::from_value(json).unwrap();
        assert_eq!(back.reserved_at, r.reserved_at);
    }
}
