//! Deduplizierungs-Fingerprint einer Ressource plus Klassifikation.
//!
//! Format: `{key1=value1,key2=value2,...}-<classification>-<condition>`.
//! Es zählen nur die 15 bekannten Felder; leere Werte und `0` gelten als
//! nicht gesetzt und fallen heraus. Die Extras nehmen nie teil.

use crate::alert::EvType;
use crate::resource::EvResource;

/// Wert, der wie ein nicht gesetztes Feld behandelt wird (neben dem Leerstring).
const ZERO: &str = "0";

/// Berechnet den Fingerprint. Total und deterministisch: gleiche Eingaben
/// liefern immer denselben String, unabhängig von der Reihenfolge der Extras.
#[must_use]
pub fn fingerprint(resource: &EvResource, kind: &EvType) -> String {
    let mut pairs: Vec<(&'static str, String)> = resource
        .known_fields()
        .map(|(key, value)| (key, value.render().into_owned()))
        .filter(|(_, rendered)| !rendered.is_empty() && rendered != ZERO)
        .collect();

    // Byteweise lexikographisch nach Schlüssel.
    pairs.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let body = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",");

    format!("{{{body}}}-{}-{}", kind.classification, kind.condition)
}
