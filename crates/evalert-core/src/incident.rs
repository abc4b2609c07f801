//! Incident-Datensatz, wie ihn das Korrelations-Backend aus Alerts bildet.
//!
//! Alle Felder sind optional; leere Werte werden beim Serialisieren weggelassen.

use crate::alert::EvInsight;
use crate::timestamp::EvTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Incident {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alert_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contextual_alert_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<EvInsight>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<EvTime>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_by: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lang_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub priority: i32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_end_point: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_changed_time: Option<EvTime>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub team: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &i32) -> bool {
    *n == 0
}
