//! Metrik-Gruppen für die Metrik-Ingestion.

use crate::timestamp::EvTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricGroup {
    pub groups: Vec<Metric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Millisekunden seit der Unix-Epoche.
    pub timestamp: i64,
    #[serde(rename = "resourceID")]
    pub resource_id: String,
    pub attributes: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, f64>,
}

impl Metric {
    /// Leere Messung für `resource_id` zum Zeitpunkt `at`.
    pub fn new(resource_id: impl Into<String>, at: EvTime) -> Self {
        Self {
            timestamp: at.unix_millis(),
            resource_id: resource_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metric_uses_resource_id_key() {
        let mut metrics = BTreeMap::new();
        metrics.insert("cpu".to_string(), 0.75);
        let group = MetricGroup {
            groups: vec![Metric {
                timestamp: 1_692_823_272_420,
                resource_id: "node1".into(),
                attributes: BTreeMap::new(),
                metrics,
            }],
        };
        let v = serde_json::to_value(&group).unwrap();
        assert_eq!(v["groups"][0]["resourceID"], json!("node1"));
        assert_eq!(v["groups"][0]["metrics"]["cpu"], json!(0.75));
    }

    #[test]
    fn new_metric_takes_epoch_millis_from_timestamp() {
        let at = EvTime::parse("2023-08-23T20:41:12.420Z").unwrap();
        let metric = Metric::new("node1", at).with_value("cpu", 0.5);
        assert_eq!(metric.timestamp, 1_692_823_272_420);
        assert_eq!(metric.resource_id, "node1");
        assert_eq!(metric.metrics["cpu"], 0.5);
        assert!(metric.attributes.is_empty());
    }
}
