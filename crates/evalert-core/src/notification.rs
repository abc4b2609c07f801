//! Änderungsbenachrichtigung des Backends über einen Alert.

use crate::alert::EvAlert;
use crate::timestamp::EvTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvChangeNotification {
    #[serde(rename = "tenantid")]
    pub tenant_id: String,
    #[serde(rename = "requestid")]
    pub request_id: String,
    pub notification_time: EvTime,
    pub r#type: String,
    pub entity_type: String,
    pub entity: EvAlert,
}
