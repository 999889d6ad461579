//! Translation between symbolic keycodes and the values a device stores.
//!
//! Text is parsed once into a [`ParsedCode`] and resolved in a fixed order:
//! the device table, the layer families, then the [`AdvancedCodec`]. Decoding
//! runs the same order in reverse and never fails; a value nothing
//! recognizes is rendered as a hex literal.

use std::fmt;

use keycodec_common::{
    keycodes::{is_sentinel, split_layer_syntax, LayerFamily},
    Byte,
};
use thiserror::Error;

use crate::{
    advanced::{AdvancedCodec, NoAdvanced},
    byte_map::{build_byte_to_name, ByteToName, NameToByte},
    layer::{LayerCode, LayerRanges},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// No resolver recognized the keycode.
    #[error("Unable to find a value for {0}")]
    CodeNotFound(String),
    /// `NAME(n)` syntax with a name that is not a layer family.
    #[error("Invalid keycode family in {0}")]
    InvalidFamily(String),
    /// The text is not a keycode of any form.
    #[error("No keycode matches {0:?}")]
    NoMatch(String),
}

/// A keycode as text resolves against one device table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParsedCode<'a> {
    Direct(&'a str),
    Layer(LayerCode),
    Advanced(&'a str),
}

impl fmt::Display for ParsedCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedCode::Direct(name) | ParsedCode::Advanced(name) => f.write_str(name),
            ParsedCode::Layer(code) => write!(f, "{code}"),
        }
    }
}

/// What a value decodes to; [`fmt::Display`] gives the keycode text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedCode<'a> {
    Named(&'a str),
    Layer(LayerCode),
    Advanced(String),
    Raw(Byte),
}

impl fmt::Display for DecodedCode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedCode::Named(name) => f.write_str(name),
            DecodedCode::Layer(code) => write!(f, "{code}"),
            DecodedCode::Advanced(code) => f.write_str(code),
            DecodedCode::Raw(byte) => write!(f, "{byte:#x}"),
        }
    }
}

/// The codec for one device table. Immutable once built; selecting another
/// device means building another codec.
#[derive(Clone, Debug)]
pub struct KeycodeCodec<A = NoAdvanced> {
    name_to_byte: NameToByte,
    byte_to_name: ByteToName,
    ranges: LayerRanges,
    advanced: A,
}

impl KeycodeCodec<NoAdvanced> {
    pub fn new(name_to_byte: NameToByte) -> Self {
        Self::with_advanced(name_to_byte, NoAdvanced)
    }
}

impl<A: AdvancedCodec> KeycodeCodec<A> {
    pub fn with_advanced(name_to_byte: NameToByte, advanced: A) -> Self {
        let byte_to_name = build_byte_to_name(&name_to_byte);
        let ranges = LayerRanges::from_table(&name_to_byte);
        log::debug!(
            "codec built: {} names, {} values, {} layer families",
            name_to_byte.len(),
            byte_to_name.len(),
            ranges.iter().count()
        );
        Self {
            name_to_byte,
            byte_to_name,
            ranges,
            advanced,
        }
    }

    pub fn name_to_byte(&self) -> &NameToByte {
        &self.name_to_byte
    }

    pub fn byte_to_name(&self) -> &ByteToName {
        &self.byte_to_name
    }

    pub fn ranges(&self) -> &LayerRanges {
        &self.ranges
    }

    pub fn parse<'a>(&self, code: &'a str) -> Result<ParsedCode<'a>, EncodeError> {
        if self.name_to_byte.contains(code) {
            return Ok(ParsedCode::Direct(code));
        }
        if let Some((name, index)) = split_layer_syntax(code) {
            let family = LayerFamily::from_name(name)
                .ok_or_else(|| EncodeError::InvalidFamily(code.to_string()))?;
            return Ok(ParsedCode::Layer(LayerCode::new(family, index)));
        }
        Ok(ParsedCode::Advanced(code))
    }

    pub fn encode_parsed(&self, parsed: &ParsedCode) -> Result<Byte, EncodeError> {
        match *parsed {
            ParsedCode::Direct(name) => self
                .name_to_byte
                .get(name)
                .ok_or_else(|| EncodeError::CodeNotFound(name.to_string())),
            ParsedCode::Layer(code) => self
                .ranges
                .encode(code)
                .ok_or_else(|| EncodeError::CodeNotFound(code.to_string())),
            ParsedCode::Advanced(raw) => {
                self.advanced
                    .encode(raw, &self.name_to_byte)
                    .ok_or_else(|| {
                        if is_keycode_token(raw) {
                            EncodeError::CodeNotFound(raw.to_string())
                        } else {
                            EncodeError::NoMatch(raw.to_string())
                        }
                    })
            }
        }
    }

    pub fn encode(&self, code: &str) -> Result<Byte, EncodeError> {
        self.encode_parsed(&self.parse(code)?)
    }

    pub fn decode_parsed(&self, byte: Byte) -> DecodedCode<'_> {
        if let Some(name) = self.byte_to_name.get(byte).filter(|n| !is_sentinel(n)) {
            DecodedCode::Named(name)
        } else if let Some(code) = self.ranges.decode(byte) {
            DecodedCode::Layer(code)
        } else if let Some(code) =
            self.advanced
                .decode(byte, &self.name_to_byte, &self.byte_to_name)
        {
            DecodedCode::Advanced(code)
        } else {
            log::debug!("no keycode for {byte:#x}");
            DecodedCode::Raw(byte)
        }
    }

    pub fn decode(&self, byte: Byte) -> String {
        self.decode_parsed(byte).to_string()
    }

    /// True when `code` would encode on this device.
    pub fn is_known_code(&self, code: &str) -> bool {
        self.encode(code).is_ok()
    }

    pub fn is_custom_keycode_byte(&self, byte: Byte) -> bool {
        self.ranges.family_contains(LayerFamily::Custom, byte)
    }

    pub fn custom_keycode_index(&self, byte: Byte) -> Option<Byte> {
        self.family_index(LayerFamily::Custom, byte)
    }

    pub fn is_macro_keycode_byte(&self, byte: Byte) -> bool {
        self.ranges.family_contains(LayerFamily::Macro, byte)
    }

    pub fn macro_keycode_index(&self, byte: Byte) -> Option<Byte> {
        self.family_index(LayerFamily::Macro, byte)
    }

    fn family_index(&self, family: LayerFamily, byte: Byte) -> Option<Byte> {
        self.ranges
            .get(family)
            .filter(|r| r.contains(byte))
            .map(|r| byte - r.base)
    }
}

/// An identifier optionally followed by one balanced parenthesised argument
/// list, e.g. `KC_A`, `S(KC_1)` or `LT(1, KC_SPC)`.
fn is_keycode_token(code: &str) -> bool {
    let ident_end = code
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(code.len());
    if ident_end == 0 {
        return false;
    }

    let args = &code[ident_end..];
    if args.is_empty() {
        return true;
    }

    let mut depth = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
                if depth == 0 && i + 1 != args.len() {
                    return false;
                }
            }
            _ if i == 0 => return false,
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | ',' | '|' | ' ') => {}
            _ => return false,
        }
    }
    depth == 0
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod test;
