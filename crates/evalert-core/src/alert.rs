//! Alerts: Events mit Lebenszyklus und Deduplizierungsfeldern.
//!
//! `deduplicationKey` und `signature` werden nie direkt gesetzt. Jeder
//! Mutator, der Ressource oder Klassifikation ändert, berechnet beide über
//! [`fingerprint`](crate::fingerprint::fingerprint) neu, bevor er zurückkehrt.
//! Die Übergänge `open → clear → closed` werden hier nicht erzwungen.

use crate::error::{CoreError, Result};
use crate::fingerprint::fingerprint;
use crate::resource::EvResource;
use crate::timestamp::EvTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Klassifikationstupel eines Events oder Alerts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvType {
    pub classification: String,
    /// `problem` oder `resolution`; als freier Text übertragen.
    pub event_type: String,
    pub condition: String,
}

impl EvType {
    pub const PROBLEM: &'static str = "problem";
    pub const RESOLUTION: &'static str = "resolution";

    pub fn new(
        classification: impl Into<String>,
        event_type: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            classification: classification.into(),
            event_type: event_type.into(),
            condition: condition.into(),
        }
    }
}

/// Verweis auf weiterführende Informationen (Runbook, Dashboard, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvLink {
    pub link_type: String,
    pub name: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvInsight {
    pub id: String,
    pub r#type: String,
    pub source: String,
}

/// Zustand eines Alerts. Rein informativ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    #[default]
    Open,
    Clear,
    Closed,
}

impl AlertState {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Clear => "clear",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(Self::Open),
            "clear" => Ok(Self::Clear),
            "closed" => Ok(Self::Closed),
            other => Err(CoreError::UnknownState(other.to_string())),
        }
    }
}

/// Ein Alert im Drahtformat des Korrelations-Backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvAlert {
    pub id: String,
    pub state: AlertState,
    pub event_count: i64,
    pub acknowledged: bool,
    pub team: String,
    pub owner: String,
    deduplication_key: String,
    signature: String,
    pub occurrence_time: EvTime,
    pub first_occurrence_time: EvTime,
    pub last_occurrence_time: EvTime,
    pub last_state_change_time: EvTime,
    pub summary: String,
    pub lang_id: String,
    pub severity: i32,
    pub sender: EvResource,
    resource: EvResource,
    #[serde(rename = "type")]
    kind: EvType,
    pub expiry_seconds: i64,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub links: Vec<EvLink>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub insights: Vec<EvInsight>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub details: BTreeMap<String, String>,
}

impl Default for EvAlert {
    fn default() -> Self {
        Self::new(String::new(), EvResource::default(), EvType::default())
    }
}

impl EvAlert {
    /// Neuer offener Alert mit `eventCount = 1`; Fingerprint ist bereits gesetzt.
    pub fn new(id: impl Into<String>, resource: EvResource, kind: EvType) -> Self {
        let mut alert = Self {
            id: id.into(),
            state: AlertState::Open,
            event_count: 1,
            acknowledged: false,
            team: String::new(),
            owner: String::new(),
            deduplication_key: String::new(),
            signature: String::new(),
            occurrence_time: EvTime::default(),
            first_occurrence_time: EvTime::default(),
            last_occurrence_time: EvTime::default(),
            last_state_change_time: EvTime::default(),
            summary: String::new(),
            lang_id: String::new(),
            severity: 0,
            sender: EvResource::default(),
            resource,
            kind,
            expiry_seconds: 0,
            links: Vec::new(),
            insights: Vec::new(),
            details: BTreeMap::new(),
        };
        alert.refresh_fingerprint();
        alert
    }

    /// Dekodiert einen Alert. Die Deduplizierungsfelder werden unverändert
    /// vom Draht übernommen.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Eingerückte JSON-Darstellung (zwei Leerzeichen).
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn resource(&self) -> &EvResource {
        &self.resource
    }

    #[must_use]
    pub fn kind(&self) -> &EvType {
        &self.kind
    }

    #[must_use]
    pub fn deduplication_key(&self) -> &str {
        &self.deduplication_key
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// `true`, wenn die gespeicherten Felder zu einer frischen Berechnung passen.
    /// Für vom Draht dekodierte Alerts kann das `false` sein.
    #[must_use]
    pub fn fingerprint_is_consistent(&self) -> bool {
        let expected = fingerprint(&self.resource, &self.kind);
        self.deduplication_key == expected && self.signature == expected
    }

    /// Ersetzt die Ressource und berechnet Key und Signatur neu.
    pub fn set_resource(&mut self, resource: EvResource) -> &mut Self {
        self.resource = resource;
        self.refresh_fingerprint()
    }

    /// Ersetzt das ganze Klassifikationstupel und berechnet neu.
    pub fn set_event_type(
        &mut self,
        classification: impl Into<String>,
        event_type: impl Into<String>,
        condition: impl Into<String>,
    ) -> &mut Self {
        self.kind = EvType::new(classification, event_type, condition);
        self.refresh_fingerprint()
    }

    /// Ändert nur `eventType`. Der Fingerprint ignoriert dieses Feld, wird
    /// aber trotzdem neu berechnet.
    pub fn set_event_type_as_problem_or_resolution(
        &mut self,
        event_type: impl Into<String>,
    ) -> &mut Self {
        self.kind.event_type = event_type.into();
        self.refresh_fingerprint()
    }

    /// Setzt die Vorkommenszeiten. `lastStateChangeTime` folgt dabei `last`.
    pub fn set_occurrence_time(
        &mut self,
        first: impl Into<EvTime>,
        last: impl Into<EvTime>,
        count: i64,
    ) -> &mut Self {
        let first = first.into();
        let last = last.into();
        self.occurrence_time = first;
        self.first_occurrence_time = first;
        self.last_occurrence_time = last;
        self.last_state_change_time = last;
        self.event_count = count;
        self
    }

    pub fn set_expiration(&mut self, seconds: i64) -> &mut Self {
        self.expiry_seconds = seconds;
        self
    }

    fn refresh_fingerprint(&mut self) -> &mut Self {
        let fp = fingerprint(&self.resource, &self.kind);
        self.signature.clone_from(&fp);
        self.deduplication_key = fp;
        self
    }
}
