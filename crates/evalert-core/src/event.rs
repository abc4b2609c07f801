//! Zustandslose Events, wie Monitoring-Produzenten sie senden.
//!
//! Ein [`EvEvent`] hat keine abgeleiteten Felder; die Mutatoren sind reine
//! Zuweisungen.

use crate::alert::{EvLink, EvType};
use crate::error::Result;
use crate::resource::EvResource;
use crate::timestamp::EvTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvEvent {
    pub id: String,
    pub occurrence_time: EvTime,
    pub summary: String,
    /// 1 (kritisch) bis 6; wird nicht geprüft.
    pub severity: i32,
    pub sender: EvResource,
    pub resource: EvResource,
    pub expiry_seconds: i64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub links: Vec<EvLink>,
    #[serde(rename = "type")]
    pub kind: EvType,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub details: BTreeMap<String, String>,
}

impl EvEvent {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn set_occurrence_time(&mut self, t: impl Into<EvTime>) -> &mut Self {
        self.occurrence_time = t.into();
        self
    }

    pub fn set_expiration(&mut self, seconds: i64) -> &mut Self {
        self.expiry_seconds = seconds;
        self
    }

    pub fn set_event_type(
        &mut self,
        classification: impl Into<String>,
        event_type: impl Into<String>,
        condition: impl Into<String>,
    ) -> &mut Self {
        self.kind = EvType::new(classification, event_type, condition);
        self
    }

    pub fn set_event_type_as_problem_or_resolution(
        &mut self,
        event_type: impl Into<String>,
    ) -> &mut Self {
        self.kind.event_type = event_type.into();
        self
    }

    pub fn set_resource(&mut self, resource: EvResource) -> &mut Self {
        self.resource = resource;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_serializes_with_wire_keys() {
        let mut event = EvEvent {
            id: "e-1".into(),
            summary: "link down".into(),
            severity: 3,
            ..EvEvent::default()
        };
        event
            .set_occurrence_time(EvTime::parse("2023-08-23T20:41:12.420Z").unwrap())
            .set_expiration(300)
            .set_event_type("System status", EvType::PROBLEM, "link down");

        let v = serde_json::to_value(&event).unwrap();
        assert_eq!(v["occurrenceTime"], json!("2023-08-23T20:41:12.420Z"));
        assert_eq!(v["expirySeconds"], json!(300));
        assert_eq!(v["type"]["eventType"], json!("problem"));
        assert_eq!(v["resource"]["port"], json!(0));
        assert!(v.get("deduplicationKey").is_none());
    }

    #[test]
    fn problem_or_resolution_only_touches_event_type() {
        let mut event = EvEvent::default();
        event.set_event_type("Uptime", EvType::PROBLEM, "host down");
        event.set_event_type_as_problem_or_resolution(EvType::RESOLUTION);
        assert_eq!(
            event.kind,
            EvType::new("Uptime", EvType::RESOLUTION, "host down")
        );
    }

    #[test]
    fn null_collections_decode_as_empty() {
        let event = EvEvent::from_slice(
            br#"{"id":"e","occurrenceTime":"2023-08-23T20:41:12.420Z","links":null,"details":null}"#,
        )
        .unwrap();
        assert!(event.links.is_empty());
        assert!(event.details.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EvEvent::from_slice(b"{\"id\":").is_err());
    }
}
