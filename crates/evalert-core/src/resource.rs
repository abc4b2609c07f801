//! Ressourcen mit festen Identitätsfeldern und offener Erweiterung.
//!
//! Eine [`EvResource`] wird als *ein* flaches JSON-Objekt übertragen. Die 15
//! bekannten Felder stehen unter reservierten Schlüsseln, alle übrigen
//! Schlüssel landen in [`EvResource::extras`].
//!
//! Der Codec arbeitet in zwei Durchgängen:
//!
//! * **Kodieren**: erst alle bekannten Felder mit ihren aktuellen Werten
//!   (leer bzw. `0`, wenn nicht gesetzt), danach werden die Extras über
//!   dasselbe Objekt gelegt. Ein Extra mit reserviertem Schlüssel überschreibt
//!   dabei das bekannte Feld in der Ausgabe.
//! * **Dekodieren**: jeder Eintrag des Objekts wird als [`Entry::Known`] oder
//!   [`Entry::Extra`] klassifiziert. Bekannte Einträge werden typisiert
//!   übernommen (ein falscher Typ lässt das Feld auf dem Nullwert) und nie in
//!   die Extras kopiert.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Eine überwachte Ressource (Host, Interface, Dienst, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvResource {
    pub name: String,
    pub source_id: String,
    pub hostname: String,
    pub ip_address: String,
    pub service: String,
    pub port: i64,
    pub interface: String,
    pub application: String,
    pub controller: String,
    pub component: String,
    pub cluster: String,
    pub location: String,
    pub access_scope: String,
    pub connection_id: String,
    pub scope_id: String,
    /// Produzentenspezifische Attribute außerhalb der bekannten Felder.
    pub extras: BTreeMap<String, Value>,
}

/// Typisierter Lesezugriff auf ein bekanntes Feld.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
}

impl<'a> FieldValue<'a> {
    /// Textdarstellung, wie sie im Fingerprint erscheint.
    #[must_use]
    pub fn render(&self) -> Cow<'a, str> {
        match *self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
        }
    }

    fn to_json(self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.to_owned()),
            FieldValue::Integer(n) => Value::from(n),
        }
    }
}

/// Ein bekanntes Feld: reservierter Drahtschlüssel plus Zugriffsfunktionen.
pub struct KnownField {
    pub key: &'static str,
    get: fn(&EvResource) -> FieldValue<'_>,
    /// Übernimmt den Wert, wenn der JSON-Typ passt; gibt `false` zurück, wenn nicht.
    assign: fn(&mut EvResource, &Value) -> bool,
}

impl KnownField {
    #[must_use]
    pub fn value<'r>(&self, resource: &'r EvResource) -> FieldValue<'r> {
        (self.get)(resource)
    }
}

impl std::fmt::Debug for KnownField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnownField").field("key", &self.key).finish()
    }
}

macro_rules! text_field {
    ($key:literal, $field:ident) => {
        KnownField {
            key: $key,
            get: |r| FieldValue::Text(&r.$field),
            assign: |r, v| match v.as_str() {
                Some(s) => {
                    r.$field = s.to_owned();
                    true
                }
                None => false,
            },
        }
    };
}

/// Die 15 bekannten Felder in Deklarationsreihenfolge. Diese Tabelle ist der
/// einzige Ort, an dem Schlüssel und Felder einander zugeordnet werden.
pub static KNOWN_FIELDS: [KnownField; 15] = [
    text_field!("name", name),
    text_field!("sourceId", source_id),
    text_field!("hostname", hostname),
    text_field!("ipAddress", ip_address),
    text_field!("service", service),
    KnownField {
        key: "port",
        get: |r| FieldValue::Integer(r.port),
        assign: |r, v| match v.as_i64() {
            Some(n) => {
                r.port = n;
                true
            }
            None => false,
        },
    },
    text_field!("interface", interface),
    text_field!("application", application),
    text_field!("controller", controller),
    text_field!("component", component),
    text_field!("cluster", cluster),
    text_field!("location", location),
    text_field!("accessScope", access_scope),
    text_field!("connectionId", connection_id),
    text_field!("scopeId", scope_id),
];

/// Liefert die Beschreibung eines reservierten Schlüssels.
#[must_use]
pub fn known_field(key: &str) -> Option<&'static KnownField> {
    KNOWN_FIELDS.iter().find(|f| f.key == key)
}

/// `true`, wenn `key` einer der 15 reservierten Schlüssel ist.
#[must_use]
pub fn is_reserved_key(key: &str) -> bool {
    known_field(key).is_some()
}

/// Ein Eintrag eines dekodierten Ressourcenobjekts.
#[derive(Debug)]
pub enum Entry {
    Known(&'static KnownField, Value),
    Extra(String, Value),
}

impl Entry {
    fn classify(key: String, value: Value) -> Self {
        match known_field(&key) {
            Some(field) => Entry::Known(field, value),
            None => Entry::Extra(key, value),
        }
    }
}

impl EvResource {
    /// Iteriert die bekannten Felder als `(Schlüssel, Wert)` in Deklarationsreihenfolge.
    pub fn known_fields(&self) -> impl Iterator<Item = (&'static str, FieldValue<'_>)> + '_ {
        KNOWN_FIELDS.iter().map(move |f| (f.key, f.value(self)))
    }

    /// Fügt ein Extra hinzu (Builder-Stil).
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    /// Erster Durchgang: bekannte Felder. Zweiter Durchgang: Extras darüberlegen.
    #[must_use]
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for (key, value) in self.known_fields() {
            out.insert(key.to_owned(), value.to_json());
        }
        for (key, value) in &self.extras {
            out.insert(key.clone(), value.clone());
        }
        out
    }

    /// Baut eine Ressource aus einem JSON-Objekt. Reservierte Schlüssel werden
    /// immer entfernt, auch wenn ihr Wert den falschen Typ hat.
    #[must_use]
    pub fn from_json_map(map: Map<String, Value>) -> Self {
        let mut resource = EvResource::default();
        for (key, value) in map {
            match Entry::classify(key, value) {
                Entry::Known(field, value) => {
                    if !(field.assign)(&mut resource, &value) {
                        report_type_mismatch(field.key, &value);
                    }
                }
                Entry::Extra(key, value) => {
                    resource.extras.insert(key, value);
                }
            }
        }
        resource
    }
}

#[cfg(feature = "telemetry")]
fn report_type_mismatch(key: &str, value: &Value) {
    tracing::debug!(key, %value, "reserved resource key has unexpected type; keeping zero value");
}

#[cfg(not(feature = "telemetry"))]
fn report_type_mismatch(_key: &str, _value: &Value) {}

impl Serialize for EvResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EvResource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Self::from_json_map(map)),
            Value::Null => Ok(Self::default()),
            other => Err(D::Error::custom(format!(
                "expected a resource object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
