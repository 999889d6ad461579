//! Text keymaps.
//!
//! A keymap is a list of `[layer]` sections, each a whitespace separated list
//! of keycodes in key order. Whitespace inside parentheses belongs to the
//! keycode, so `LT(1, KC_SPC)` is one key. `#` starts a comment. A `0x` hex
//! literal stands for a raw value, which is how undecodable values come back
//! out of [`decompile`].

use std::{fmt::Write, ops::Range, str::CharIndices};

use keycodec_common::Byte;

use crate::{
    advanced::AdvancedCodec,
    codec::KeycodeCodec,
    error::{KeymapError, KeymapErrorKind},
    parse_byte,
};

type Result<T> = core::result::Result<T, KeymapError>;
type IndexChar = (usize, char);
type NameRange = Range<usize>;

const LAYER_SECTION: &str = "layer";
const UNKNOWN_SECTION: &str = "Unknown section";
const UNEXPECTED_CLOSE: &str = "Unexpected ')'";
const EOF: &str = "Unexpected end of file";

struct SourceIter<'source> {
    iter: CharIndices<'source>,
    current: IndexChar,
    next: Option<IndexChar>,
    len: usize,
}
impl<'source> SourceIter<'source> {
    pub fn new(iter: CharIndices<'source>, len: usize) -> Self {
        Self {
            iter,
            current: (usize::MAX, '\0'),
            next: None,
            len,
        }
    }

    fn put_back(&mut self, item: IndexChar) {
        debug_assert!(self.next.is_none() && item.0 == self.current.0);
        self.next = Some(item);
    }

    fn next(&mut self) -> Option<IndexChar> {
        let mut in_comment = false;
        while let Some(item) = self.next.take().or_else(|| self.iter.next()) {
            match item.1 {
                '\n' => {}
                '#' => {
                    in_comment = true;
                    continue;
                }
                _ => {
                    if in_comment {
                        continue;
                    }
                }
            }
            self.current = item;
            return Some(item);
        }
        self.current.0 = self.len;
        None
    }

    fn find(&mut self, pred: impl Fn(char) -> bool) -> Option<IndexChar> {
        while let Some(item) = self.next() {
            if pred(item.1) {
                return Some(item);
            }
        }
        None
    }
}

fn non_ws_char(c: char) -> bool {
    !c.is_whitespace()
}

fn invalid_section_char(c: char) -> bool {
    !matches!(c, '-' | '_' | '.') && !c.is_alphanumeric()
}

/// Per layer key values, every layer the same length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Keymap {
    layers: Vec<Vec<Byte>>,
}

impl Keymap {
    pub fn new(layers: Vec<Vec<Byte>>) -> Self {
        Self { layers }
    }

    /// Splits device order values into layers of `layer_len` keys. The last
    /// layer is short when `values` is not a whole number of layers.
    pub fn from_values(values: &[Byte], layer_len: usize) -> Self {
        let layer_len = if layer_len == 0 {
            values.len().max(1)
        } else {
            layer_len
        };
        Self {
            layers: values.chunks(layer_len).map(<[Byte]>::to_vec).collect(),
        }
    }

    pub fn layers(&self) -> &[Vec<Byte>] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn key_count(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    /// All values in device order: layer by layer, key by key.
    pub fn serialize(&self) -> Vec<Byte> {
        self.layers.concat()
    }
}

struct Parser<'source, 'codec, A> {
    iter: SourceIter<'source>,
    source: &'source str,
    codec: &'codec KeycodeCodec<A>,
    layers: Vec<(NameRange, Vec<Byte>)>,
    mark_idx: usize,
}

impl<'source, 'codec, A: AdvancedCodec> Parser<'source, 'codec, A> {
    fn new(source: &'source str, codec: &'codec KeycodeCodec<A>) -> Self {
        Self {
            iter: SourceIter::new(source.char_indices(), source.len()),
            source,
            codec,
            layers: Vec::new(),
            mark_idx: 0,
        }
    }

    fn parse_sections(&mut self) -> Result<()> {
        loop {
            match self.next_non_ws() {
                None => return Ok(()),
                Some(start) => {
                    if start.1 != '[' {
                        return Err(syntax_error(
                            "expected '['",
                            start.0..start.0 + start.1.len_utf8(),
                        ));
                    }
                    self.mark_start();
                    match self.iter.find(|c| c == ']' || invalid_section_char(c)) {
                        Some(end) if end.1 == ']' => {
                            let tag_name = &self.source[start.0 + 1..end.0];
                            if tag_name != LAYER_SECTION {
                                return Err(syntax_error(UNKNOWN_SECTION, start.0..end.0 + 1));
                            }
                            self.parse_layer(start.0..end.0 + 1)?;
                        }
                        _ => {
                            return Err(syntax_error("missing ']'", start.0..start.0 + 1))
                        }
                    }
                }
            }
        }
    }

    fn parse_layer(&mut self, header: NameRange) -> Result<()> {
        let mut codes = Vec::new();
        while let Some(pos) = self.skip_whitespace() {
            if pos.1 == '[' {
                break;
            }
            let range = self.read_keycode()?;
            codes.push(self.encode(range)?);
        }
        log::trace!("layer {} has {} keys", self.layers.len(), codes.len());
        self.layers.push((header, codes));
        Ok(())
    }

    fn encode(&self, range: NameRange) -> Result<Byte> {
        let code = &self.source[range.clone()];
        if code.starts_with("0x") {
            return parse_byte(code)
                .map_err(|_| KeymapError::new(KeymapErrorKind::InvalidValue(code.into()), range));
        }
        self.codec
            .encode(code)
            .map_err(|err| KeymapError::new(err, range))
    }

    /// Reads one keycode, keeping parenthesised arguments together.
    fn read_keycode(&mut self) -> Result<NameRange> {
        let Some(start) = self.next_non_ws() else {
            return Err(self.error(EOF));
        };
        self.mark_start();
        let mut depth = 0usize;
        let mut last = start;
        let mut item = Some(start);
        while let Some(ic) = item {
            match ic.1 {
                c if c.is_whitespace() && depth == 0 => {
                    self.iter.put_back(ic);
                    break;
                }
                '(' => depth += 1,
                ')' => {
                    if depth == 0 {
                        return Err(syntax_error(UNEXPECTED_CLOSE, ic.0..ic.0 + 1));
                    }
                    depth -= 1;
                }
                _ => {}
            }
            last = ic;
            item = self.iter.next();
        }
        if depth != 0 {
            return Err(syntax_error("missing ')'", start.0..self.iter.current.0));
        }
        Ok(start.0..last.0 + last.1.len_utf8())
    }

    fn check_layer_lengths(&self) -> Result<()> {
        let Some((_, first)) = self.layers.first() else {
            return Ok(());
        };
        for (i, (header, codes)) in self.layers.iter().enumerate().skip(1) {
            if codes.len() != first.len() {
                let kind = KeymapErrorKind::LayerLength {
                    layer: i,
                    keys: codes.len(),
                    expected: first.len(),
                };
                return Err(KeymapError::new(kind, header.clone()));
            }
        }
        Ok(())
    }

    fn mark_start(&mut self) {
        self.mark_idx = self.iter.current.0;
    }

    fn error(&self, message: &'static str) -> KeymapError {
        syntax_error(message, self.mark_idx..self.iter.current.0)
    }

    fn build_keymap(self) -> Keymap {
        Keymap::new(self.layers.into_iter().map(|(_, codes)| codes).collect())
    }

    fn skip_whitespace(&mut self) -> Option<IndexChar> {
        self.next_non_ws().inspect(|&item| {
            self.iter.put_back(item);
        })
    }

    #[inline]
    fn next_non_ws(&mut self) -> Option<IndexChar> {
        self.iter.find(non_ws_char)
    }
}

fn syntax_error(message: &'static str, range: NameRange) -> KeymapError {
    KeymapError::new(KeymapErrorKind::Syntax(message), range)
}

pub fn compile<A: AdvancedCodec>(source: &str, codec: &KeycodeCodec<A>) -> Result<Keymap> {
    let mut parser = Parser::new(source, codec);

    parser.parse_sections()?;
    parser.check_layer_lengths()?;
    Ok(parser.build_keymap())
}

/// Renders device order values as keymap text, `cols` keys to a line. A
/// `cols` of zero puts each layer on one line.
pub fn decompile<A: AdvancedCodec>(
    values: &[Byte],
    layer_len: usize,
    cols: usize,
    codec: &KeycodeCodec<A>,
) -> String {
    let keymap = Keymap::from_values(values, layer_len);
    let mut out = String::new();
    for (i, layer) in keymap.layers().iter().enumerate() {
        if i != 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{LAYER_SECTION}] # {i}");
        let codes: Vec<String> = layer.iter().map(|&b| codec.decode(b)).collect();
        let width = codes.iter().map(|c| c.chars().count()).max().unwrap_or(0);
        let cols = if cols == 0 { codes.len().max(1) } else { cols };
        for row in codes.chunks(cols) {
            let line = row.iter().fold(String::new(), |mut line, code| {
                let _ = write!(line, "{code:<width$} ");
                line
            });
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }
    out
}

#[cfg(test)]
#[path = "compiler_test.rs"]
mod test;
