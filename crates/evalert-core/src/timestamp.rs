//! Zeitstempel im festen Drahtformat `YYYY-MM-DDTHH:mm:ss.sssZ`.
//!
//! [`EvTime`] hält immer einen UTC-Zeitpunkt mit Millisekunden-Auflösung.
//! Das Dekodieren ist strikt: jede Abweichung vom Muster (fehlende
//! Millisekunden, Offset statt `Z`, Leerzeichen) ist ein Fehler und wird
//! nicht stillschweigend korrigiert.

use crate::error::{CoreError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::macros::{datetime, format_description};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

const WIRE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Ein UTC-Zeitpunkt, der als `2023-08-23T20:41:12.420Z` serialisiert wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EvTime(OffsetDateTime);

impl EvTime {
    /// Aktueller Zeitpunkt, auf Millisekunden gekürzt.
    #[must_use]
    pub fn now() -> Self {
        Self::from(OffsetDateTime::now_utc())
    }

    /// Parst das Drahtformat. Alles, was nicht exakt dem Muster entspricht,
    /// liefert [`CoreError::Timestamp`].
    pub fn parse(s: &str) -> Result<Self> {
        let dt = PrimitiveDateTime::parse(s, WIRE_FORMAT)
            .map_err(|e| CoreError::Timestamp(format!("{s:?}: {e}")))?;
        if dt.year() < 0 {
            return Err(CoreError::Timestamp(format!("{s:?}: year out of range")));
        }
        Ok(Self(dt.assume_utc()))
    }

    /// Frühester darstellbarer Zeitpunkt (Jahr 0000).
    pub const MIN: Self = Self(datetime!(0000-01-01 0:00 UTC));
    /// Spätester darstellbarer Zeitpunkt (Jahr 9999, letzte Millisekunde).
    pub const MAX: Self = Self(datetime!(9999-12-31 23:59:59.999 UTC));

    /// Rendert den Zeitpunkt im Drahtformat. Total, weil das Jahr immer
    /// vierstellig und nicht negativ ist.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let t = self.0;
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            t.year(),
            u8::from(t.month()),
            t.day(),
            t.hour(),
            t.minute(),
            t.second(),
            t.millisecond()
        )
    }

    #[must_use]
    pub fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        // Passt für alle Jahre bis 9999 problemlos in i64.
        #[allow(clippy::cast_possible_truncation)]
        {
            (self.0.unix_timestamp_nanos() / 1_000_000) as i64
        }
    }
}

impl Default for EvTime {
    fn default() -> Self {
        Self(OffsetDateTime::UNIX_EPOCH)
    }
}

impl From<OffsetDateTime> for EvTime {
    /// Normalisiert nach UTC und kürzt auf Millisekunden, damit ein Wert nach
    /// einem Umlauf über das Drahtformat gleich bleibt. Zeitpunkte außerhalb
    /// der Jahre 0000..=9999 werden auf [`EvTime::MIN`] bzw. [`EvTime::MAX`]
    /// begrenzt, weil das Drahtformat nur vierstellige Jahre kennt.
    fn from(t: OffsetDateTime) -> Self {
        let utc = t.to_offset(UtcOffset::UTC);
        let truncated = Self(utc.replace_millisecond(utc.millisecond()).unwrap_or(utc));
        truncated.clamp(Self::MIN, Self::MAX)
    }
}

impl From<EvTime> for OffsetDateTime {
    fn from(t: EvTime) -> Self {
        t.0
    }
}

impl fmt::Display for EvTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl FromStr for EvTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for EvTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for EvTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
