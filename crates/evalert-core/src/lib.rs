#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Events und Alerts für ein Alert-Korrelations-Backend.
//!
//! Kern dieses Crates sind zwei Dinge:
//!
//! * der Codec für [`EvResource`]: 15 typisierte Identitätsfelder plus eine
//!   offene Erweiterung, übertragen als ein flaches JSON-Objekt;
//! * der Deduplizierungs-[`fingerprint`], der wiederholte Meldungen desselben
//!   Problems auf derselben Ressource zusammenführt.
//!
//! Speicherung, Abgleich mit früheren Alerts und Lebenszyklusregeln gehören
//! nicht hierher.

pub mod alert;
pub mod error;
pub mod event;
pub mod fingerprint;
pub mod incident;
pub mod metric;
pub mod notification;
pub mod resource;
pub mod timestamp;

mod nullable;

pub use alert::{AlertState, EvAlert, EvInsight, EvLink, EvType};
pub use error::{CoreError, Result};
pub use event::EvEvent;
pub use fingerprint::fingerprint;
pub use incident::Incident;
pub use metric::{Metric, MetricGroup};
pub use notification::EvChangeNotification;
pub use resource::{EvResource, FieldValue, KnownField, KNOWN_FIELDS};
pub use timestamp::EvTime;
