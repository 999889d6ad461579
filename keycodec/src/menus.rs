//! Which keycodes a particular keyboard offers.

use keycodec_common::keycodes::prefix;

use crate::{
    byte_map::{uncataloged_names, NameToByte},
    definition::{KeyboardDefinition, KeycodeSource, KeycodeType},
    registry::{find_menu, get_keycodes, menu_id, Keycode, KeycodeMenu},
};

/// The keycode module every keyboard has.
pub const DEFAULT_MODULE: &str = "default";

const DEFAULT_MENUS: [&str; 5] = [
    menu_id::BASIC,
    menu_id::MEDIA,
    menu_id::MACRO,
    menu_id::LAYERS,
    menu_id::SPECIAL,
];

/// Menu ids unlocked by a keycode module. A module named after a menu
/// unlocks just that menu.
pub fn categories_for_keycode_module(module: &str) -> Vec<&'static str> {
    match module {
        DEFAULT_MODULE => DEFAULT_MENUS.to_vec(),
        _ => match find_menu(module) {
            Some(menu) => vec![menu.id],
            None => {
                log::warn!("Unknown keycode module {module:?}");
                Vec::new()
            }
        },
    }
}

fn lighting_categories(keycodes: KeycodeType) -> Vec<&'static str> {
    match keycodes {
        KeycodeType::None => Vec::new(),
        KeycodeType::Qmk => categories_for_keycode_module(menu_id::QMK_LIGHTING),
        KeycodeType::Wt => categories_for_keycode_module(menu_id::WT_LIGHTING),
    }
}

/// Menu ids a keyboard offers.
pub fn categories_for_keyboard(source: KeycodeSource) -> Vec<&'static str> {
    match source {
        KeycodeSource::V2(lighting) => {
            let mut ids = categories_for_keycode_module(DEFAULT_MODULE);
            ids.extend(lighting_categories(lighting.keycode_type()));
            ids
        }
        KeycodeSource::V3(modules) => modules
            .iter()
            .flat_map(|m| categories_for_keycode_module(m))
            .collect(),
    }
}

/// The keycodes of every menu the keyboard offers, sorted by code.
///
/// Codes in more than one offered menu appear once per menu. A definition
/// without keycode modules offers nothing.
pub fn get_keycodes_for_keyboard(definition: &KeyboardDefinition) -> Vec<&'static Keycode> {
    let ids = match definition.keycode_source() {
        Ok(source) => categories_for_keyboard(source),
        Err(err) => {
            log::warn!("{err}");
            return Vec::new();
        }
    };

    let mut list: Vec<&'static Keycode> = get_keycodes()
        .iter()
        .filter(|menu| ids.contains(&menu.id))
        .flat_map(|menu| menu.keycodes.iter())
        .collect();
    list.sort_by(|a, b| a.code.cmp(&b.code));
    list
}

/// Device table names the catalog does not describe.
pub fn get_other_menu(name_to_byte: &NameToByte) -> KeycodeMenu {
    let keycodes = uncataloged_names(name_to_byte)
        .map(|code| {
            let name = code
                .strip_prefix(prefix::BASIC)
                .unwrap_or(code)
                .replace('_', " ");
            Keycode::new(name, code)
        })
        .collect();
    KeycodeMenu {
        id: menu_id::OTHER,
        label: "Other",
        keycodes,
        width: None,
        detailed: None,
    }
}

#[cfg(test)]
#[path = "menus_test.rs"]
mod test;
