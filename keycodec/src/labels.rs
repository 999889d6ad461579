//! Choosing the text drawn on a key cap for a given rendering width.

use keycodec_common::{keycodes::prefix, Byte};

use crate::{
    advanced::AdvancedCodec,
    codec::KeycodeCodec,
    registry::{find_keycode, Keycode},
};

/// Width at or below which a keycode's `short_name` is preferred.
pub const SHORT_NAME_MAX_SIZE: u32 = 150;
/// The standard one unit key width.
pub const UNIT_SIZE: u32 = 100;

const SHORTEN_MIN_LEN: usize = 5;
const SHORTEN_PREFER_CODE_LEN: usize = 4;

const CENTERED_SYMBOLS: &str = "-+.÷×";
const TOP_LEGENDS: &str = "~!@#$%^&*()_+|{}:\"<>?";
const SHIFTED_SYMBOLS: &str = "!@#$%^&*()_+|~{}:\"<>?";

/// Keeps the first character of each space separated word and drops the
/// vowels from the rest.
///
/// ```
/// assert_eq!(keycodec::labels::shorten("Caps Lock"), "CpsLck");
/// ```
pub fn shorten(name: &str) -> String {
    name.split(' ')
        .flat_map(|word| {
            let mut chars = word.chars();
            let first = chars.next();
            first.into_iter().chain(chars.filter(|c| {
                !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | ' ')
            }))
        })
        .collect()
}

pub fn short_label(keycode: &Keycode, size: u32) -> String {
    if size <= SHORT_NAME_MAX_SIZE {
        if let Some(short_name) = keycode.short_name.as_ref().filter(|s| !s.is_empty()) {
            return short_name.clone();
        }
    }

    if size == UNIT_SIZE && keycode.name.chars().count() > SHORTEN_MIN_LEN {
        let shortened = shorten(&keycode.name);
        if keycode.code.is_empty() {
            return shortened;
        }
        let code = keycode.code.strip_prefix(prefix::BASIC).unwrap_or(&keycode.code);
        let candidate: String = code.chars().filter(|&c| c != '_').collect();
        let shortened_len = shortened.chars().count();
        return if shortened_len > SHORTEN_PREFER_CODE_LEN
            && candidate.chars().count() < shortened_len
        {
            candidate
        } else {
            shortened
        };
    }

    keycode.name.clone()
}

/// The label for a value read from a device: the catalog entry's label when
/// the decoded code is in the catalog, otherwise the decoded code itself.
pub fn label_for_byte<A: AdvancedCodec>(
    byte: Byte,
    size: u32,
    codec: &KeycodeCodec<A>,
) -> String {
    let code = codec.decode(byte);
    match find_keycode(&code) {
        Some(keycode) => short_label(keycode, size),
        None => code,
    }
}

fn single_char(label: &str) -> Option<char> {
    let mut chars = label.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn first_char_in(label: &str, set: &str) -> bool {
    label.chars().next().is_some_and(|c| set.contains(c))
}

pub fn is_alpha(label: &str) -> bool {
    single_char(label).is_some_and(|c| c.is_ascii_alphabetic())
}

pub fn is_numpad_number(label: &str) -> bool {
    single_char(label).is_some_and(|c| c.is_ascii_digit() || c == '\'')
}

pub fn is_arrow_key(label: &str) -> bool {
    label
        .chars()
        .next_back()
        .is_some_and(|c| "🠗🠕🠖🠔←↑→↓".contains(c))
}

pub fn is_numpad_symbol(label: &str) -> bool {
    single_char(label).is_some_and(|c| CENTERED_SYMBOLS.contains(c))
}

/// Two stacked legends such as `"!\n1"`.
pub fn is_multi_legend(label: &str) -> bool {
    single_char(label).is_none() && first_char_in(label, TOP_LEGENDS)
}

pub fn is_numeric_or_shifted_symbol(label: &str) -> bool {
    single_char(label).is_some_and(|c| SHIFTED_SYMBOLS.contains(c) || c.is_ascii_digit())
}

pub fn is_numeric_symbol(label: &str) -> bool {
    single_char(label).is_none() && first_char_in(label, SHIFTED_SYMBOLS)
}

#[cfg(test)]
#[path = "labels_test.rs"]
mod test;
