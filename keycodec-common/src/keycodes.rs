use crate::Byte;

pub mod prefix {
    /// Table entries starting with this mark the bounds of a layer family's range.
    pub const SENTINEL: &str = "_QK";
    pub const BASIC: &str = "KC_";
}

/// A keycode kind parameterized by a layer (or slot) index, written `NAME(n)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerFamily {
    To,
    Mo,
    Df,
    Tg,
    Osl,
    Tt,
    Custom,
    Macro,
}

impl LayerFamily {
    /// Families in decode order. When device ranges overlap the first family
    /// containing a value wins.
    pub const ALL: [LayerFamily; 8] = [
        LayerFamily::To,
        LayerFamily::Mo,
        LayerFamily::Df,
        LayerFamily::Tg,
        LayerFamily::Osl,
        LayerFamily::Tt,
        LayerFamily::Custom,
        LayerFamily::Macro,
    ];

    pub const fn name(self) -> &'static str {
        use LayerFamily::*;
        match self {
            To => "TO",
            Mo => "MO",
            Df => "DF",
            Tg => "TG",
            Osl => "OSL",
            Tt => "TT",
            Custom => "CUSTOM",
            Macro => "MACRO",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub const fn base_sentinel(self) -> &'static str {
        use LayerFamily::*;
        match self {
            To => "_QK_TO",
            Mo => "_QK_MOMENTARY",
            Df => "_QK_DEF_LAYER",
            Tg => "_QK_TOGGLE_LAYER",
            Osl => "_QK_ONE_SHOT_LAYER",
            Tt => "_QK_LAYER_TAP_TOGGLE",
            Custom => "_QK_KB",
            Macro => "_QK_MACRO",
        }
    }

    pub const fn max_sentinel(self) -> &'static str {
        use LayerFamily::*;
        match self {
            To => "_QK_TO_MAX",
            Mo => "_QK_MOMENTARY_MAX",
            Df => "_QK_DEF_LAYER_MAX",
            Tg => "_QK_TOGGLE_LAYER_MAX",
            Osl => "_QK_ONE_SHOT_LAYER_MAX",
            Tt => "_QK_LAYER_TAP_TOGGLE_MAX",
            Custom => "_QK_KB_MAX",
            Macro => "_QK_MACRO_MAX",
        }
    }

    /// Position within [`LayerFamily::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl core::fmt::Display for LayerFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn is_sentinel(name: &str) -> bool {
    name.starts_with(prefix::SENTINEL)
}

/// Splits a whole `NAME(digits)` code into its name and index.
///
/// The name must be ASCII letters. Indexes too large for a [`Byte`] saturate
/// so that callers clamping to a family's range still land on its maximum.
pub fn split_layer_syntax(code: &str) -> Option<(&str, Byte)> {
    let open = code.find('(')?;
    let (name, rest) = code.split_at(open);
    let digits = rest.strip_prefix('(')?.strip_suffix(')')?;
    if name.is_empty()
        || digits.is_empty()
        || !name.bytes().all(|b| b.is_ascii_alphabetic())
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let index = digits.bytes().fold(0 as Byte, |n, b| {
        n.saturating_mul(10).saturating_add((b - b'0') as Byte)
    });
    Some((name, index))
}

#[cfg(test)]
#[path = "keycodes_test.rs"]
mod test;
