//! Umlauf- und Verschattungsverhalten des Ressourcen-Codecs.

use evalert_core::resource::is_reserved_key;
use evalert_core::EvResource;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn sample() -> EvResource {
    EvResource {
        name: "node1".into(),
        hostname: "node1".into(),
        interface: "GigabitEthernet0/0/0".into(),
        port: 161,
        ..EvResource::default()
    }
    .with_extra("extraK1", "value1")
    .with_extra("extraK2", json!({"nested": [1, 2, 3]}))
}

#[test]
fn disjoint_keys_roundtrip_exactly() {
    let original = sample();
    let bytes = serde_json::to_vec(&original).expect("encode");
    let decoded: EvResource = serde_json::from_slice(&bytes).expect("decode");
    assert_eq!(decoded, original);
}

#[test]
fn encoded_object_is_flat() {
    let v = serde_json::to_value(sample()).expect("encode");
    let obj = v.as_object().expect("object");
    assert_eq!(obj.len(), 17);
    assert_eq!(obj["extraK1"], json!("value1"));
    assert_eq!(obj["port"], json!(161));
    assert!(obj.get("extras").is_none());
}

#[test]
fn extension_shadows_known_field_on_encode_and_is_lost_on_decode() {
    let r = EvResource {
        hostname: "typed-host".into(),
        ..EvResource::default()
    }
    .with_extra("hostname", "shadow-host")
    .with_extra("rack", "r7");

    let encoded = serde_json::to_value(&r).expect("encode");
    assert_eq!(encoded["hostname"], json!("shadow-host"));

    let decoded: EvResource = serde_json::from_value(encoded).expect("decode");
    assert_eq!(decoded.hostname, "shadow-host");
    assert!(!decoded.extras.contains_key("hostname"));
    assert_eq!(decoded.extras.len(), 1);
    assert_ne!(decoded, r);
}

#[test]
fn shadowing_with_incompatible_type_zeroes_the_known_field() {
    let r = EvResource {
        port: 8080,
        ..EvResource::default()
    }
    .with_extra("port", "eighty");

    let encoded = serde_json::to_value(&r).expect("encode");
    assert_eq!(encoded["port"], json!("eighty"));

    let decoded: EvResource = serde_json::from_value(encoded).expect("decode");
    assert_eq!(decoded.port, 0);
    assert!(decoded.extras.is_empty());
}

#[test]
fn decoded_extras_never_contain_reserved_keys() {
    let decoded: EvResource = serde_json::from_value(json!({
        "name": null,
        "sourceId": ["x"],
        "ipAddress": {"v4": "10.0.0.1"},
        "port": true,
        "scopeId": "s-1",
        "Name": "case matters",
        "custom": 1.5
    }))
    .expect("decode");

    assert!(decoded.extras.keys().all(|k| !is_reserved_key(k)));
    assert_eq!(decoded.scope_id, "s-1");
    assert_eq!(decoded.extras.len(), 2);
    assert_eq!(decoded.extras["Name"], json!("case matters"));
}

#[test]
fn empty_object_decodes_with_empty_extras() {
    let decoded: EvResource = serde_json::from_str("{}").expect("decode");
    assert_eq!(decoded, EvResource::default());
    assert!(decoded.extras.is_empty());
}

#[test]
fn null_decodes_as_empty_resource() {
    let decoded: EvResource = serde_json::from_str("null").expect("decode");
    assert_eq!(decoded, EvResource::default());
    assert!(decoded.extras.is_empty());
}

#[test]
fn malformed_json_fails() {
    let res: Result<EvResource, _> = serde_json::from_str(r#"{"name": "n",}"#);
    assert!(res.is_err());
    let res: Result<EvResource, _> = serde_json::from_value(Value::String("n".into()));
    assert!(res.is_err());
    let res: Result<EvResource, _> = serde_json::from_value(json!(["n"]));
    assert!(res.is_err());
}
