use crate::{
    labels::short_label,
    registry::{find_keycode, keycodes_list},
    test::{codec, device_table, kc},
};

use super::*;

/// Encodes `S(name)` as the named value with bit 9 set.
struct ShiftedCodec;

const SHIFT: Byte = 0x200;

impl AdvancedCodec for ShiftedCodec {
    fn encode(&self, code: &str, name_to_byte: &NameToByte) -> Option<Byte> {
        let inner = code.strip_prefix("S(")?.strip_suffix(')')?;
        name_to_byte.get(inner).map(|b| b | SHIFT)
    }

    fn decode(
        &self,
        byte: Byte,
        _name_to_byte: &NameToByte,
        byte_to_name: &ByteToName,
    ) -> Option<String> {
        if byte & SHIFT == 0 {
            return None;
        }
        byte_to_name
            .get(byte & !SHIFT)
            .map(|name| format!("S({name})"))
    }
}

fn shifted() -> KeycodeCodec<ShiftedCodec> {
    KeycodeCodec::with_advanced(device_table(), ShiftedCodec)
}

#[test]
fn direct_codes() {
    let c = codec();
    assert_eq!(c.encode("KC_A"), Ok(4));
    assert_eq!(c.encode("KC_ENTER"), Ok(40));
    assert_eq!(c.decode(4), "KC_A");
    assert_eq!(c.decode(40), "KC_ENT");
    assert_eq!(c.decode(41), "KC_ESC");
    assert_eq!(c.decode(255), "RESET");
}

#[test]
fn layer_codes() {
    let c = codec();
    assert_eq!(c.encode("TO(3)"), Ok(103));
    assert_eq!(c.encode("TO(20)"), Ok(115));
    assert_eq!(c.encode("MO(0)"), Ok(116));
    assert_eq!(c.encode("MACRO(5)"), Ok(185));
    assert_eq!(c.encode("CUSTOM(99999999)"), Ok(179));

    assert_eq!(c.decode(103), "TO(3)");
    assert_eq!(c.decode(116), "MO(0)");
    assert_eq!(c.decode(185), "MACRO(5)");
}

#[test]
fn sentinels_are_never_decoded() {
    let c = codec();
    assert_eq!(c.byte_to_name().get(100), Some("_QK_TO"));
    assert_eq!(c.decode(100), "TO(0)");
    assert_eq!(c.decode(131), "MO(15)");
    assert_eq!(c.decode(195), "MACRO(15)");
}

#[test]
fn parse_is_tagged() {
    let c = codec();
    assert_eq!(c.parse("KC_A"), Ok(ParsedCode::Direct("KC_A")));
    assert_eq!(
        c.parse("OSL(2)"),
        Ok(ParsedCode::Layer(LayerCode::new(LayerFamily::Osl, 2)))
    );
    assert_eq!(c.parse("S(KC_A)"), Ok(ParsedCode::Advanced("S(KC_A)")));
    assert_eq!(c.parse("OSL(2)").unwrap().to_string(), "OSL(2)");

    let parsed = c.parse("TT(1)").unwrap();
    assert_eq!(c.encode_parsed(&parsed), Ok(157));
}

#[test]
fn table_entries_shadow_layer_syntax() {
    let mut table = device_table();
    table.insert("MO(1)", 7);
    let c = KeycodeCodec::new(table);
    assert_eq!(c.parse("MO(1)"), Ok(ParsedCode::Direct("MO(1)")));
    assert_eq!(c.encode("MO(1)"), Ok(7));
    assert_eq!(c.encode("MO(2)"), Ok(118));
}

#[test]
fn encode_errors() {
    let c = codec();
    assert_eq!(
        c.encode("FOO(3)"),
        Err(EncodeError::InvalidFamily("FOO(3)".into()))
    );
    assert_eq!(
        c.encode("KC_NOPE"),
        Err(EncodeError::CodeNotFound("KC_NOPE".into()))
    );
    assert_eq!(
        c.encode("S(KC_A)"),
        Err(EncodeError::CodeNotFound("S(KC_A)".into()))
    );
    assert_eq!(
        c.encode("LT(1, KC_SPC)"),
        Err(EncodeError::CodeNotFound("LT(1, KC_SPC)".into()))
    );
    for junk in ["", " KC_A", "KC_A ", "S(KC_A", "S(KC_A))", "S(KC_A)x", "(1)", "KC-A", "KC_A\n"] {
        assert_eq!(
            c.encode(junk),
            Err(EncodeError::NoMatch(junk.into())),
            "{junk:?}"
        );
    }
}

#[test]
fn family_without_range() {
    let c = KeycodeCodec::new([("KC_A", 4)].into_iter().collect());
    assert_eq!(
        c.encode("MO(1)"),
        Err(EncodeError::CodeNotFound("MO(1)".into()))
    );
    assert_eq!(c.decode(116), "0x74");
}

#[test]
fn error_messages() {
    assert_eq!(
        EncodeError::InvalidFamily("FOO(3)".into()).to_string(),
        "Invalid keycode family in FOO(3)"
    );
    assert_eq!(
        EncodeError::NoMatch("".into()).to_string(),
        "No keycode matches \"\""
    );
}

#[test]
fn unknown_values_render_as_hex() {
    let c = codec();
    assert_eq!(c.decode(0x2b), "KC_TAB");
    assert_eq!(c.decode(0x3a), "0x3a");
    assert_eq!(c.decode(0xabcd), "0xabcd");
    assert_eq!(c.decode_parsed(0x3a), DecodedCode::Raw(0x3a));
}

#[test]
fn advanced_is_consulted_last() {
    let c = shifted();
    assert_eq!(c.encode("S(KC_1)"), Ok(30 | SHIFT));
    assert_eq!(c.decode(30 | SHIFT), "S(KC_1)");
    assert_eq!(
        c.decode_parsed(4 | SHIFT),
        DecodedCode::Advanced("S(KC_A)".into())
    );
    assert_eq!(c.encode("S(KC_NOPE)"), Err(EncodeError::CodeNotFound("S(KC_NOPE)".into())));
    // direct and layer resolution come first
    assert_eq!(c.encode("KC_A"), Ok(4));
    assert_eq!(c.decode(103), "TO(3)");
    assert_eq!(c.decode(0x3a), "0x3a");
}

#[test]
fn boxed_advanced() {
    let boxed: Box<dyn AdvancedCodec> = Box::new(ShiftedCodec);
    let c = KeycodeCodec::with_advanced(device_table(), boxed);
    assert_eq!(c.encode("S(KC_B)"), Ok(5 | SHIFT));
}

#[test]
fn known_codes() {
    let c = codec();
    assert!(c.is_known_code("KC_A"));
    assert!(c.is_known_code("DF(1)"));
    assert!(!c.is_known_code("XX(1)"));
    assert!(!c.is_known_code("S(KC_A)"));
    assert!(shifted().is_known_code("S(KC_A)"));
}

#[test]
fn custom_and_macro_values() {
    let c = codec();
    assert!(c.is_custom_keycode_byte(kc("CUSTOM(2)")));
    assert_eq!(c.custom_keycode_index(kc("CUSTOM(2)")), Some(2));
    assert!(!c.is_custom_keycode_byte(kc("MACRO(2)")));
    assert_eq!(c.custom_keycode_index(kc("MACRO(2)")), None);

    assert!(c.is_macro_keycode_byte(180));
    assert_eq!(c.macro_keycode_index(195), Some(15));
    assert!(!c.is_macro_keycode_byte(196));
}

#[test]
fn catalog_round_trips() {
    let mut table: NameToByte = keycodes_list()
        .iter()
        .enumerate()
        .map(|(i, k)| (k.code.clone(), 300 + i as Byte))
        .collect();
    for (i, family) in LayerFamily::ALL.into_iter().enumerate() {
        let base = 0x1000 + 0x100 * i as Byte;
        table.insert(family.base_sentinel(), base);
        table.insert(family.max_sentinel(), base + 0x1f);
    }
    let c = KeycodeCodec::new(table);

    for k in keycodes_list() {
        let byte = c.encode(&k.code).unwrap();
        assert_eq!(c.encode(&k.code), Ok(byte));
        let decoded = c.decode(byte);
        assert_eq!(decoded, k.code);
        let back = find_keycode(&decoded).unwrap();
        assert_eq!(short_label(back, 100), short_label(k, 100));
    }
}
