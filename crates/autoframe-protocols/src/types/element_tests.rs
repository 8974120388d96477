use super::*;

fn sample_element(x: f64) -> ElementDescriptor {
    ElementDescriptor {
        x,
        y: 5.0,
        width: 40.0,
        height: 30.0,
        properties: NodeProperties::default(),
    }
}

#[test]
fn test_key_strings_roundtrip() {
    for key in ElementKey::ALL {
        assert_eq!(ElementKey::from_key(key.as_str()), Some(key));
        let json = serde_json::to_value(key).unwrap();
        assert_eq!(json, key.as_str());
    }
}

#[test]
fn test_unknown_key() {
    assert_eq!(ElementKey::from_key("vectorImage"), None);
    assert_eq!(ElementKey::from_key("Logo"), None);
}

#[test]
fn test_descriptor_always_has_every_key() {
    let descriptor = FrameDescriptor {
        frame_name: "Banner".to_string(),
        width: 400.0,
        height: 300.0,
        elements: ElementSlots::default(),
    };

    let json = serde_json::to_value(&descriptor).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(json["frameName"], "Banner");
    for key in ElementKey::ALL {
        assert!(object.contains_key(key.as_str()), "missing key {}", key);
        assert!(json[key.as_str()].is_null());
    }
}

#[test]
fn test_slots_set_and_get() {
    let mut slots = ElementSlots::default();
    slots.set(ElementKey::SalesBadge, Some(sample_element(12.0)));

    assert_eq!(slots.get(ElementKey::SalesBadge).unwrap().x, 12.0);
    assert!(slots.get(ElementKey::Logo).is_none());
    assert_eq!(slots.found_count(), 1);

    let json = serde_json::to_value(&slots).unwrap();
    assert_eq!(json["salesBadge"]["x"], 12.0);
    assert_eq!(json["salesBadge"]["width"], 40.0);
}

#[test]
fn test_slots_iterate_in_table_order() {
    let slots = ElementSlots::default();
    let keys: Vec<_> = slots.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ElementKey::ALL.to_vec());
}
