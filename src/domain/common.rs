use chrono::NaiveDateTime;

use super::records::CategoryKey;

/// Entities positioned on the dashboard timeline.
pub trait Dated {
    fn occurred_at(&self) -> NaiveDateTime;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Associates a record with its income category grouping key.
pub trait BelongsToCategory {
    fn category_key(&self) -> CategoryKey;
}

/// Serde adapter for record timestamps.
///
/// Writes `YYYY-MM-DDTHH:MM:SS.mmm`; reads anything `calendar::parse_timestamp` accepts.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::calendar::parse_timestamp;

    const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
