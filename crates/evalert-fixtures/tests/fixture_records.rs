use evalert_core::{fingerprint, AlertState, EvAlert, EvEvent, EvResource, EvType};
use evalert_fixtures::{random_alert, random_event, random_links, random_resource, random_type};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn random_alerts_are_consistent_and_open() {
    let mut rng = StdRng::seed_from_u64(2023);
    for _ in 0..50 {
        let alert = random_alert(&mut rng);
        assert_eq!(alert.state, AlertState::Open);
        assert_eq!(alert.deduplication_key(), alert.signature());
        assert_eq!(
            alert.signature(),
            fingerprint(alert.resource(), alert.kind())
        );
        assert!((1..=10).contains(&alert.event_count));
        assert!((1..=6).contains(&alert.severity));
        assert!((0..=3000).contains(&alert.expiry_seconds));
        assert!(alert.last_occurrence_time >= alert.first_occurrence_time);
        assert_eq!(alert.occurrence_time, alert.first_occurrence_time);
        assert!(["eng", "fra", "deu", "jpn", "kor", "zho"].contains(&alert.lang_id.as_str()));
    }
}

#[test]
fn random_alert_survives_the_wire() {
    let mut rng = StdRng::seed_from_u64(99);
    let alert = random_alert(&mut rng);
    let text = alert.to_json_pretty().expect("encode");
    let back = EvAlert::from_slice(text.as_bytes()).expect("decode");
    assert_eq!(back, alert);
}

#[test]
fn random_events_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let event = random_event(&mut rng);
        assert!((1..=6).contains(&event.severity));
        assert!((300..=1000).contains(&event.expiry_seconds));
        assert!((1..=2).contains(&event.links.len()));
        let text = event.to_json_pretty().expect("encode");
        assert_eq!(EvEvent::from_slice(text.as_bytes()).expect("decode"), event);
    }
}

#[test]
fn random_types_use_problem_or_resolution() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let kind = random_type(&mut rng);
        assert!(kind.event_type == EvType::PROBLEM || kind.event_type == EvType::RESOLUTION);
        assert!(kind.condition.contains(' '));
        assert!(!kind.classification.is_empty());
    }
}

#[test]
fn resource_fingerprint_lists_all_fifteen_fields() {
    let mut rng = StdRng::seed_from_u64(3);
    let resource: EvResource = random_resource(&mut rng);
    let fp = fingerprint(&resource, &EvType::default());
    assert_eq!(fp.matches('=').count(), 15);
    assert!(!random_links(&mut rng).is_empty());
}
