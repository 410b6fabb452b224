//! Wire formats for chrono types.
//!
//! Use with `#[serde(with = "crate::utils::datetime::date_time")]`.

pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

macro_rules! chrono_format {
    ($module:ident, $ty:ty, $format:expr) => {
        pub mod $module {
            use serde::{de, Deserialize, Deserializer, Serializer};

            pub fn serialize<S>(value: &$ty, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_str(&value.format($format))
            }

            pub fn deserialize<'de, D>(deserializer: D) -> Result<$ty, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                <$ty>::parse_from_str(&raw, $format).map_err(de::Error::custom)
            }
        }
    };
}

chrono_format!(date_time, chrono::NaiveDateTime, super::DATE_TIME_FORMAT);
chrono_format!(date, chrono::NaiveDate, super::DATE_FORMAT);
chrono_format!(time, chrono::NaiveTime, super::TIME_FORMAT);

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "super::date_time")]
        at: NaiveDateTime,
        #[serde(with = "super::date")]
        day: NaiveDate,
        #[serde(with = "super::time")]
        clock: NaiveTime,
    }

    fn sample() -> Stamped {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let clock = NaiveTime::from_hms_opt(7, 5, 30).unwrap();
        Stamped {
            at: day.and_time(clock),
            day,
            clock,
        }
    }

    #[test]
    fn test_serialized_layout() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["at"], "2024-03-09 07:05:30");
        assert_eq!(json["day"], "2024-03-09");
        assert_eq!(json["clock"], "07:05:30");
    }

    #[test]
    fn test_parses_wire_format() {
        let parsed: Stamped = serde_json::from_str(
            r#"{"at":"2024-03-09 07:05:30","day":"2024-03-09","clock":"07:05:30"}"#,
        )
        .unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_rejects_iso_separator() {
        let parsed = serde_json::from_str::<Stamped>(
            r#"{"at":"2024-03-09T07:05:30","day":"2024-03-09","clock":"07:05:30"}"#,
        );
        assert!(parsed.is_err());
    }
}
