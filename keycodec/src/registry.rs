use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

/// How a picker should present a keycode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeycodeKind {
    Container,
    Text,
    Layer,
}

/// One entry of the catalog. `code` is the identity used for encoding; every
/// other field is display only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keycode {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<KeycodeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<u8>,
}

impl Keycode {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn short(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn keys(mut self, keys: impl Into<String>) -> Self {
        self.keys = Some(keys.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    fn layer_template(name: &str, title: &str) -> Self {
        Self {
            kind: Some(KeycodeKind::Layer),
            layer: Some(0),
            ..Self::new(name, format!("{name}(layer)")).title(title)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuWidth {
    Label,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeycodeMenu {
    pub id: &'static str,
    pub label: &'static str,
    pub keycodes: Vec<Keycode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<MenuWidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed: Option<&'static str>,
}

impl KeycodeMenu {
    fn new(id: &'static str, label: &'static str, keycodes: Vec<Keycode>) -> Self {
        Self {
            id,
            label,
            keycodes,
            width: None,
            detailed: None,
        }
    }

    fn label_width(mut self) -> Self {
        self.width = Some(MenuWidth::Label);
        self
    }
}

pub mod menu_id {
    pub const BASIC: &str = "basic";
    pub const WT_LIGHTING: &str = "wt_lighting";
    pub const MEDIA: &str = "media";
    pub const MACRO: &str = "macro";
    pub const LAYERS: &str = "layers";
    pub const SPECIAL: &str = "special";
    pub const QMK_LIGHTING: &str = "qmk_lighting";
    pub const CUSTOM: &str = "custom";
    pub const OTHER: &str = "other";
}

const LAYER_PLACEHOLDER: &str = "layer";
const GENERATED_LAYERS: u8 = 10;
const NUMBERED_SLOTS: u8 = 16;

lazy_static! {
    static ref KEYCODE_MENUS: Vec<KeycodeMenu> = build_menus();
    static ref KEYCODES_LIST: Vec<&'static Keycode> =
        KEYCODE_MENUS.iter().flat_map(|m| m.keycodes.iter()).collect();
    static ref CATALOG_INDEX: HashMap<&'static str, &'static Keycode> = {
        let mut m = HashMap::new();
        for &k in KEYCODES_LIST.iter() {
            m.entry(k.code.as_str()).or_insert(k);
        }
        m
    };
}

/// The fixed, ordered list of keycode menus.
pub fn get_keycodes() -> &'static [KeycodeMenu] {
    KEYCODE_MENUS.as_slice()
}

/// Every catalog keycode, in menu order.
pub fn keycodes_list() -> &'static [&'static Keycode] {
    KEYCODES_LIST.as_slice()
}

pub fn find_keycode(code: &str) -> Option<&'static Keycode> {
    CATALOG_INDEX.get(code).copied()
}

pub fn is_catalog_code(code: &str) -> bool {
    CATALOG_INDEX.contains_key(code)
}

pub fn find_menu(id: &str) -> Option<&'static KeycodeMenu> {
    get_keycodes().iter().find(|m| m.id == id)
}

fn build_menus() -> Vec<KeycodeMenu> {
    vec![
        KeycodeMenu::new(menu_id::BASIC, "Basic", basic_keycodes()),
        KeycodeMenu::new(menu_id::WT_LIGHTING, "Lighting", wt_lighting_keycodes()).label_width(),
        KeycodeMenu::new(menu_id::MEDIA, "Media", media_keycodes()).label_width(),
        KeycodeMenu::new(
            menu_id::MACRO,
            "Macro",
            numbered(|i| Keycode::new(format!("M{i}"), format!("MACRO({i})")).title(format!("Macro {i}"))),
        )
        .label_width(),
        build_layer_menu(),
        KeycodeMenu::new(menu_id::SPECIAL, "Special", special_keycodes()).label_width(),
        KeycodeMenu::new(menu_id::QMK_LIGHTING, "Lighting", qmk_lighting_keycodes()).label_width(),
        // names and titles are placeholders; a keyboard definition supplies its own
        KeycodeMenu::new(
            menu_id::CUSTOM,
            "Custom",
            numbered(|i| {
                let code = format!("CUSTOM({i})");
                Keycode::new(code.clone(), code).title(format!("Custom Keycode {i}"))
            }),
        )
        .label_width(),
    ]
}

fn numbered(f: impl Fn(u8) -> Keycode) -> Vec<Keycode> {
    (0..NUMBERED_SLOTS).map(f).collect()
}

fn build_layer_menu() -> KeycodeMenu {
    let fixed = [
        Keycode::new("Fn1\n(Fn3)", "FN_MO13")
            .title("Hold = Layer 1, Hold with Fn2 = Layer 3")
            .short("Fn1(3)"),
        Keycode::new("Fn2\n(Fn3)", "FN_MO23")
            .title("Hold = Layer 2, Hold with Fn1 = Layer 3")
            .short("Fn2(3)"),
    ];

    let templates = [
        Keycode::layer_template("MO", "Momentary turn layer on"),
        Keycode::layer_template("TG", "Toggle layer on/off"),
        Keycode::layer_template(
            "TT",
            "Normally acts like MO unless it's tapped multiple times, which toggles layer on",
        ),
        Keycode::layer_template("OSL", "Switch to layer for one keypress"),
        Keycode::layer_template("TO", "Turn on layer when pressed"),
        Keycode::layer_template("DF", "Sets the default layer"),
    ];

    let generated = templates.iter().flat_map(|template| {
        (0..GENERATED_LAYERS).map(move |idx| Keycode {
            name: format!("{}({idx})", template.name),
            code: template.code.replacen(LAYER_PLACEHOLDER, &idx.to_string(), 1),
            title: template
                .title
                .as_ref()
                .map(|t| t.replacen(LAYER_PLACEHOLDER, &format!("layer {idx}"), 1)),
            ..template.clone()
        })
    });

    KeycodeMenu::new(menu_id::LAYERS, "Layers", fixed.into_iter().chain(generated).collect())
        .label_width()
}

fn basic_keycodes() -> Vec<Keycode> {
    let mut list = vec![
        Keycode::new("", "KC_NO").title("Nothing"),
        Keycode::new("▽", "KC_TRNS").title("Pass-through"),
        Keycode::new("Esc", "KC_ESC").keys("esc"),
    ];
    list.extend(('A'..='Z').map(|c| {
        Keycode::new(c.to_string(), format!("KC_{c}")).keys(c.to_ascii_lowercase().to_string())
    }));
    list.extend(
        [
            ("!\n1", "KC_1", "1"),
            ("@\n2", "KC_2", "2"),
            ("#\n3", "KC_3", "3"),
            ("$\n4", "KC_4", "4"),
            ("%\n5", "KC_5", "5"),
            ("^\n6", "KC_6", "6"),
            ("&\n7", "KC_7", "7"),
            ("*\n8", "KC_8", "8"),
            ("(\n9", "KC_9", "9"),
            (")\n0", "KC_0", "0"),
            ("_\n-", "KC_MINS", "-"),
            ("+\n=", "KC_EQL", "="),
            ("~\n`", "KC_GRV", "`"),
            ("{\n[", "KC_LBRC", "["),
            ("}\n]", "KC_RBRC", "]"),
        ]
        .map(|(name, code, keys)| Keycode::new(name, code).keys(keys)),
    );
    list.push(Keycode::new("|\n\\", "KC_BSLS").keys("\\").width(1500));
    list.extend(
        [
            (":\n;", "KC_SCLN", ";"),
            ("\"\n'", "KC_QUOT", "'"),
            ("<\n,", "KC_COMM", ","),
            (">\n.", "KC_DOT", "."),
            ("?\n/", "KC_SLSH", "/"),
        ]
        .map(|(name, code, keys)| Keycode::new(name, code).keys(keys)),
    );
    list.push(Keycode::new("=", "KC_PEQL"));
    list.push(Keycode::new(",", "KC_PCMM"));
    list.extend((1..=12).map(|n| Keycode::new(format!("F{n}"), format!("KC_F{n}"))));
    list.extend([
        Keycode::new("Print Screen", "KC_PSCR").short("Print"),
        Keycode::new("Scroll Lock", "KC_SLCK").short("Scroll"),
        Keycode::new("Pause", "KC_PAUS"),
        Keycode::new("Tab", "KC_TAB").keys("tab").width(1500),
        Keycode::new("Backspace", "KC_BSPC").keys("backspace").width(2000).short("Bksp"),
        Keycode::new("Insert", "KC_INS").keys("insert").short("Ins"),
        Keycode::new("Del", "KC_DEL").keys("delete").title("Delete"),
        Keycode::new("Home", "KC_HOME").keys("home").title("Home"),
        Keycode::new("End", "KC_END").keys("end").title("End"),
        Keycode::new("Page Up", "KC_PGUP").keys("pageup").short("PgUp"),
        Keycode::new("Page Down", "KC_PGDN").keys("pagedown").short("PgDn"),
        Keycode::new("Num\nLock", "KC_NLCK")
            .keys("num")
            .short("N.Lck")
            .title("Numpad Lock"),
        Keycode::new("Caps Lock", "KC_CAPS").keys("caps_lock").width(1750).title("Caps Lock"),
        Keycode::new("Enter", "KC_ENT").keys("enter").width(2250).title("Enter"),
    ]);
    list.extend((1..=9).chain([0]).map(|n| {
        let k = Keycode::new(n.to_string(), format!("KC_P{n}"))
            .keys(format!("num_{n}"))
            .title(format!("Numpad {n}"));
        if n == 0 {
            k.width(2000)
        } else {
            k
        }
    }));
    list.extend(
        [
            ("÷", "KC_PSLS", "num_divide"),
            ("×", "KC_PAST", "num_multiply"),
            ("-", "KC_PMNS", "num_subtract"),
            ("+", "KC_PPLS", "num_add"),
            (".", "KC_PDOT", "num_decimal"),
        ]
        .map(|(name, code, keys)| {
            Keycode::new(name, code).keys(keys).title(format!("Numpad {name}"))
        }),
    );
    list.extend([
        Keycode::new("Num\nEnter", "KC_PENT").short("N.Ent").title("Numpad Enter"),
        Keycode::new("Left Shift", "KC_LSFT")
            .keys("shift")
            .width(2250)
            .short("LShft")
            .title("Left Shift"),
        Keycode::new("Right Shift", "KC_RSFT").width(2750).short("RShft").title("Right Shift"),
        Keycode::new("Left Ctrl", "KC_LCTL").keys("ctrl").width(1250).title("Left Ctrl"),
        Keycode::new("Right Ctrl", "KC_RCTL").width(1250).short("RCtl").title("Right Ctrl"),
        Keycode::new("Left Win", "KC_LGUI").keys("cmd").width(1250).short("LWin").title("Left Win"),
        Keycode::new("Right Win", "KC_RGUI").width(1250).short("RWin").title("Right Win"),
        Keycode::new("Left Alt", "KC_LALT").keys("alt").width(1250).short("LAlt").title("Left Alt"),
        Keycode::new("Right Alt", "KC_RALT").width(1250).short("RAlt").title("Right Alt"),
        Keycode::new("Space", "KC_SPC").keys("space").width(6250).title("Space"),
        Keycode::new("Menu", "KC_APP").width(1250).short("Menu").title("Menu"),
        Keycode::new("Left", "KC_LEFT").keys("left").short("←").title("Left"),
        Keycode::new("Down", "KC_DOWN").keys("down").short("↓").title("Down"),
        Keycode::new("Up", "KC_UP").keys("up").short("↑").title("Up"),
        Keycode::new("Right", "KC_RGHT").keys("right").short("→").title("Right"),
    ]);
    list
}

fn wt_lighting_keycodes() -> Vec<Keycode> {
    [
        ("Bright -", "BR_DEC", "Brightness -", "BR -"),
        ("Bright +", "BR_INC", "Brightness +", "BR +"),
        ("Effect -", "EF_DEC", "Effect -", "EF -"),
        ("Effect +", "EF_INC", "Effect +", "EF +"),
        ("Effect Speed -", "ES_DEC", "Effect Speed -", "ES -"),
        ("Effect Speed +", "ES_INC", "Effect Speed +", "ES +"),
        ("Color1 Hue -", "H1_DEC", "Color1 Hue -", "H1 -"),
        ("Color1 Hue +", "H1_INC", "Color1 Hue +", "H1 +"),
        ("Color2 Hue -", "H2_DEC", "Color2 Hue -", "H2 -"),
        ("Color2 Hue +", "H2_INC", "Color2 Hue +", "H2 +"),
        ("Color1 Sat -", "S1_DEC", "Color1 Sat -", "S1 -"),
        ("Color1 Sat +", "S1_INC", "Color1 Sat +", "S1 +"),
        ("Color2 Sat -", "S2_DEC", "Color2 Sat -", "S2 -"),
        ("Color2 Sat +", "S2_INC", "Color2 Sat +", "S2 +"),
    ]
    .map(|(name, code, title, short)| Keycode::new(name, code).title(title).short(short))
    .into()
}

fn media_keycodes() -> Vec<Keycode> {
    [
        ("Vol -", "KC_VOLD", "Volume Down"),
        ("Vol +", "KC_VOLU", "Volume Up"),
        ("Mute", "KC_MUTE", "Mute Audio"),
        ("Play", "KC_MPLY", "Play/Pause"),
        ("Media Stop", "KC_MSTP", "Media Stop"),
        ("Previous", "KC_MPRV", "Previous Track"),
        ("Next", "KC_MNXT", "Next Track"),
        ("Rewind", "KC_MRWD", "Rewind"),
        ("Fast Forward", "KC_MFFD", "Fast Forward"),
        ("Select", "KC_MSEL", "Media Select"),
        ("Eject", "KC_EJCT", "Media Eject"),
    ]
    .map(|(name, code, title)| Keycode::new(name, code).title(title))
    .into()
}

fn special_keycodes() -> Vec<Keycode> {
    let mut list: Vec<Keycode> = [
        ("~", "KC_GRV", "`"),
        ("!", "KC_1", "1"),
        ("@", "KC_2", "2"),
        ("#", "KC_3", "3"),
        ("$", "KC_4", "4"),
        ("%", "KC_5", "5"),
        ("^", "KC_6", "6"),
        ("&", "KC_7", "7"),
        ("*", "KC_8", "8"),
        ("(", "KC_9", "9"),
        (")", "KC_0", "0"),
        ("_", "KC_MINS", "-"),
        ("+", "KC_EQL", "="),
        ("{", "KC_LBRC", "["),
        ("}", "KC_RBRC", "]"),
        ("|", "KC_BSLS", "\\"),
        (":", "KC_SCLN", ";"),
        ("\"", "KC_QUOT", "'"),
        ("<", "KC_COMM", ","),
        (">", "KC_DOT", "."),
        ("?", "KC_SLSH", "/"),
    ]
    .map(|(name, base, key)| {
        Keycode::new(name, format!("S({base})"))
            .keys(name)
            .title(format!("Shift + {key}"))
    })
    .into();

    list.extend(
        [
            ("NUHS", "KC_NUHS", "Non-US # and ~"),
            ("NUBS", "KC_NUBS", "Non-US \\ and |"),
            ("Ro", "KC_RO", "JIS \\ and |"),
            ("¥", "KC_JYEN", "JPN Yen"),
            ("無変換", "KC_MHEN", "JIS Muhenkan"),
            ("漢字", "KC_HANJ", "Hanja"),
            ("한영", "KC_HAEN", "HanYeong"),
            ("変換", "KC_HENK", "JIS Henkan"),
            ("かな", "KC_KANA", "JIS Katakana/Hiragana"),
            ("Esc `", "KC_GESC", "Esc normally, but ` when Shift or Win is pressed"),
            ("LS (", "KC_LSPO", "Left Shift when held, ( when tapped"),
            ("RS )", "KC_RSPC", "Right Shift when held, ) when tapped"),
            ("LC (", "KC_LCPO", "Left Control when held, ( when tapped"),
            ("RC )", "KC_RCPC", "Right Control when held, ) when tapped"),
            ("LA (", "KC_LAPO", "Left Alt when held, ( when tapped"),
            ("RA )", "KC_RAPC", "Right Alt when held, ) when tapped"),
            ("SftEnt", "KC_SFTENT", "Right Shift when held, Enter when tapped"),
            ("Reset", "RESET", "Reset the keyboard into bootloader mode"),
            ("Debug", "DEBUG", "Toggle debug mode"),
        ]
        .map(|(name, code, title)| Keycode::new(name, code).title(title)),
    );
    list.push(
        Keycode::new("Toggle NKRO", "MAGIC_TOGGLE_NKRO")
            .short("NKRO")
            .title("Toggle NKRO"),
    );

    list.extend(
        [
            ("Locking Num Lock", "KC_LNUM"),
            ("Locking Caps Lock", "KC_LCAP"),
            ("Locking Scroll Lock", "KC_LSCR"),
            ("Power", "KC_PWR"),
            ("Power OSX", "KC_POWER"),
            ("Sleep", "KC_SLEP"),
            ("Wake", "KC_WAKE"),
            ("Calc", "KC_CALC"),
            ("Mail", "KC_MAIL"),
            ("Help", "KC_HELP"),
            ("Stop", "KC_STOP"),
            ("Alt Erase", "KC_ERAS"),
            ("Again", "KC_AGAIN"),
            ("Menu", "KC_MENU"),
            ("Undo", "KC_UNDO"),
            ("Select", "KC_SELECT"),
            ("Exec", "KC_EXECUTE"),
            ("Cut", "KC_CUT"),
            ("Copy", "KC_COPY"),
            ("Paste", "KC_PASTE"),
            ("Find", "KC_FIND"),
            ("My Comp", "KC_MYCM"),
            ("Home", "KC_WWW_HOME"),
            ("Back", "KC_WWW_BACK"),
            ("Forward", "KC_WWW_FORWARD"),
            ("Stop", "KC_WWW_STOP"),
            ("Refresh", "KC_WWW_REFRESH"),
            ("Favorites", "KC_WWW_FAVORITES"),
            ("Search", "KC_WWW_SEARCH"),
        ]
        .map(|(name, code)| Keycode::new(name, code)),
    );
    list.push(Keycode::new("Screen +", "KC_BRIU").short("Scr +").title("Screen Brightness Up"));
    list.push(Keycode::new("Screen -", "KC_BRID").short("Scr -").title("Screen Brightness Down"));
    list.extend((13..=24).map(|n| Keycode::new(format!("F{n}"), format!("KC_F{n}"))));

    list.extend(
        [
            ("Mouse ↑", "KC_MS_UP"),
            ("Mouse ↓", "KC_MS_DOWN"),
            ("Mouse ←", "KC_MS_LEFT"),
            ("Mouse →", "KC_MS_RIGHT"),
        ]
        .map(|(name, code)| Keycode::new(name, code)),
    );
    list.extend((1..=8).map(|n| Keycode::new(format!("Mouse Btn{n}"), format!("KC_MS_BTN{n}"))));
    list.extend(
        [
            ("Mouse Wh ↑", "KC_MS_WH_UP"),
            ("Mouse Wh ↓", "KC_MS_WH_DOWN"),
            ("Mouse Wh ←", "KC_MS_WH_LEFT"),
            ("Mouse Wh →", "KC_MS_WH_RIGHT"),
        ]
        .map(|(name, code)| Keycode::new(name, code)),
    );
    list.extend(
        (0..=2).map(|n| Keycode::new(format!("Mouse Acc{n}"), format!("KC_MS_ACCEL{n}"))),
    );

    list.extend(
        [
            ("Audio On", "AU_ON"),
            ("Audio Off", "AU_OFF"),
            ("Audio Toggle", "AU_TOG"),
            ("Clicky Toggle", "CLICKY_TOGGLE"),
            ("Clicky Enable", "CLICKY_ENABLE"),
            ("Clicky Disable", "CLICKY_DISABLE"),
            ("Clicky Up", "CLICKY_UP"),
            ("Clicky Down", "CLICKY_DOWN"),
            ("Clicky Reset", "CLICKY_RESET"),
            ("Music On", "MU_ON"),
            ("Music Off", "MU_OFF"),
            ("Music Toggle", "MU_TOG"),
            ("Music Mode", "MU_MOD"),
        ]
        .map(|(name, code)| Keycode::new(name, code)),
    );
    list
}

fn qmk_lighting_keycodes() -> Vec<Keycode> {
    let mut list: Vec<Keycode> = [
        ("BL Toggle", "BL_TOGG"),
        ("BL On", "BL_ON"),
        ("BL -", "BL_DEC"),
        ("BL +", "BL_INC"),
        ("BL Cycle", "BL_STEP"),
        ("BR Toggle", "BL_BRTG"),
        ("RGB Toggle", "RGB_TOG"),
        ("RGB Mode -", "RGB_RMOD"),
        ("RGB Mode +", "RGB_MOD"),
        ("Hue -", "RGB_HUD"),
        ("Hue +", "RGB_HUI"),
        ("Sat -", "RGB_SAD"),
        ("Sat +", "RGB_SAI"),
        ("Bright -", "RGB_VAD"),
        ("Bright +", "RGB_VAI"),
        ("Effect Speed-", "RGB_SPD"),
        ("Effect Speed+", "RGB_SPI"),
    ]
    .map(|(name, code)| Keycode::new(name, code))
    .into();
    list.insert(2, Keycode::new("BL Off", "BL_OFF").short("BL Off"));
    list.extend(
        [
            ("RGB Mode P", "RGB_M_P", "Plain"),
            ("RGB Mode B", "RGB_M_B", "Breathe"),
            ("RGB Mode R", "RGB_M_R", "Rainbow"),
            ("RGB Mode SW", "RGB_M_SW", "Swirl"),
            ("RGB Mode SN", "RGB_M_SN", "Snake"),
            ("RGB Mode K", "RGB_M_K", "Knight"),
            ("RGB Mode X", "RGB_M_X", "Xmas"),
            ("RGB Mode G", "RGB_M_G", "Gradient"),
        ]
        .map(|(name, code, title)| Keycode::new(name, code).title(title)),
    );
    list
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod test;
