use std::path::Path;

use keycodec_common::Byte;

pub mod advanced;
pub mod byte_map;
pub mod codec;
pub mod compiler;
pub mod definition;
pub mod error;
pub mod labels;
pub mod layer;
pub mod menus;
pub mod registry;
pub mod session;

pub use error::{KeymapError, KeymapErrorKind};
pub use keycodec_common::keycodes::LayerFamily;

/// Compiles a keymap source, printing a labelled report for errors that
/// point into the source.
pub fn pretty_compile<A: advanced::AdvancedCodec>(
    file: &Path,
    src: &str,
    codec: &codec::KeycodeCodec<A>,
) -> Result<compiler::Keymap, KeymapError> {
    match compiler::compile(src, codec) {
        Ok(keymap) => Ok(keymap),
        Err(err) => {
            use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
            let filename = file.to_str().unwrap_or("<unknown>");
            let mut colors = ColorGenerator::new();

            let a = colors.next();
            if let Some(span) = err.char_span(src) {
                let _ = Report::build(ReportKind::Error, (filename, span.clone()))
                    .with_message("Invalid keymap".to_string())
                    .with_label(
                        Label::new((filename, span))
                            .with_message(err.message())
                            .with_color(a),
                    )
                    .finish()
                    .eprint((filename, Source::from(src)));
            }
            Err(err)
        }
    }
}

/// Parses a value written in hex (`0x2a`) or decimal (`42`).
pub fn parse_byte(text: &str) -> Result<Byte, String> {
    let text = text.trim();
    let lower = text.to_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        Byte::from_str_radix(hex, 16)
    } else {
        text.parse::<Byte>()
    }
    .map_err(|_| format!("Invalid value {text:?}"))
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod test;
