use crate::test::device_table;

use super::*;

use LayerFamily::*;

fn ranges() -> LayerRanges {
    LayerRanges::from_table(&device_table())
}

#[test]
fn reads_sentinels() {
    let r = ranges();
    assert_eq!(r.get(To), Some(LayerRange { base: 100, max: 115 }));
    assert_eq!(r.get(Mo), Some(LayerRange { base: 116, max: 131 }));
    assert_eq!(r.get(Macro).unwrap().capacity(), 15);
    assert_eq!(r.iter().count(), 8);
}

#[test]
fn missing_sentinels() {
    let table: NameToByte = [("_QK_TO", 100), ("_QK_TO_MAX", 115), ("_QK_MOMENTARY", 116)]
        .into_iter()
        .collect();
    let r = LayerRanges::from_table(&table);
    assert!(r.get(To).is_some());
    assert_eq!(r.get(Mo), None);
    assert_eq!(r.encode(LayerCode::new(Mo, 1)), None);
    assert_eq!(r.decode(117), None);
}

#[test]
fn encode_clamps() {
    let r = ranges();
    assert_eq!(r.encode(LayerCode::new(To, 3)), Some(103));
    assert_eq!(r.encode(LayerCode::new(To, 20)), Some(115));
    assert_eq!(r.encode(LayerCode::new(To, Byte::MAX)), Some(115));
    assert_eq!(r.decode(115), Some(LayerCode::new(To, 15)));
}

#[test]
fn decode_inverts_encode() {
    let r = ranges();
    for family in LayerFamily::ALL {
        let range = r.get(family).unwrap();
        for n in 0..=range.capacity() {
            let code = LayerCode::new(family, n);
            assert_eq!(r.decode(r.encode(code).unwrap()), Some(code));
        }
        let over = LayerCode::new(family, range.capacity() + 1);
        assert_eq!(r.encode(over), Some(range.max));
        assert_eq!(
            r.decode(range.max),
            Some(LayerCode::new(family, range.capacity()))
        );
    }
}

#[test]
fn first_family_wins_on_overlap() {
    let table: NameToByte = [
        ("_QK_MOMENTARY", 110),
        ("_QK_MOMENTARY_MAX", 125),
        ("_QK_TO", 100),
        ("_QK_TO_MAX", 115),
    ]
    .into_iter()
    .collect();
    let r = LayerRanges::from_table(&table);
    assert_eq!(r.decode(112), Some(LayerCode::new(To, 12)));
    assert_eq!(r.decode(116), Some(LayerCode::new(Mo, 6)));
    assert!(r.family_contains(Mo, 112));
}

#[test]
fn adjacent_ranges() {
    let r = ranges();
    assert_eq!(r.decode(116), Some(LayerCode::new(Mo, 0)));
    assert!(r.contains(195));
    assert!(!r.contains(99));
    assert!(!r.contains(196));
}

#[test]
fn display() {
    assert_eq!(LayerCode::new(Osl, 4).to_string(), "OSL(4)");
    assert_eq!(LayerCode::new(Custom, 12).to_string(), "CUSTOM(12)");
}
