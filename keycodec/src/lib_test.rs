use keycodec_common::Byte;

use crate::{byte_map::NameToByte, codec::KeycodeCodec, parse_byte};

/// A small device table: basic keys, a few aliases, media keys and the eight
/// layer family ranges laid end to end from 100.
pub fn device_table() -> NameToByte {
    let mut m = NameToByte::new();
    m.insert("KC_NO", 0);
    m.insert("KC_TRNS", 1);
    for (i, c) in ('A'..='Z').enumerate() {
        m.insert(format!("KC_{c}"), 4 + i as Byte);
    }
    for (i, n) in (1..=9).chain([0]).enumerate() {
        m.insert(format!("KC_{n}"), 30 + i as Byte);
    }
    m.insert("KC_ENTER", 40);
    m.insert("KC_ENT", 40);
    m.insert("KC_ESC", 41);
    m.insert("KC_ESCAPE", 41);
    m.insert("KC_BSPC", 42);
    m.insert("KC_TAB", 43);
    m.insert("KC_SPC", 44);
    m.insert("KC_CAPS", 57);

    let mut base = 100;
    for (family, len) in [
        ("TO", 16),
        ("MOMENTARY", 16),
        ("DEF_LAYER", 8),
        ("TOGGLE_LAYER", 8),
        ("ONE_SHOT_LAYER", 8),
        ("LAYER_TAP_TOGGLE", 8),
        ("KB", 16),
        ("MACRO", 16),
    ] {
        m.insert(format!("_QK_{family}"), base);
        m.insert(format!("_QK_{family}_MAX"), base + len - 1);
        base += len;
    }

    m.insert("KC_MUTE", 200);
    m.insert("KC_VOLU", 201);
    m.insert("KC_VOLD", 202);
    m.insert("QK_BOOT", 255);
    m.insert("RESET", 255);
    m.insert("KC_EXSEL", 254);
    m
}

pub fn codec() -> KeycodeCodec {
    KeycodeCodec::new(device_table())
}

pub fn kc(code: &str) -> Byte {
    match codec().encode(code) {
        Ok(byte) => byte,
        Err(err) => panic!("Unknown keycode {code:?}: {err}"),
    }
}

#[test]
fn fixture_ranges_end_before_media() {
    assert_eq!(kc("MACRO(15)"), 195);
    assert_eq!(kc("KC_MUTE"), 200);
    assert_eq!(kc("KC_0"), 39);
}

#[test]
fn parse_byte_forms() {
    assert_eq!(parse_byte("0x2a"), Ok(42));
    assert_eq!(parse_byte("0X2A"), Ok(42));
    assert_eq!(parse_byte(" 42 "), Ok(42));
    assert!(parse_byte("0x").is_err());
    assert!(parse_byte("70000").is_err());
    assert!(parse_byte("KC_A").is_err());
}
