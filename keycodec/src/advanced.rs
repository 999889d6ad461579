use keycodec_common::Byte;

use crate::byte_map::{ByteToName, NameToByte};

/// Codec for composite keycodes (modifier wraps, tap-hold forms and the like)
/// consulted only after direct and layer resolution fail. `None` means the
/// input is not one of its forms.
pub trait AdvancedCodec {
    fn encode(&self, code: &str, name_to_byte: &NameToByte) -> Option<Byte>;
    fn decode(&self, byte: Byte, name_to_byte: &NameToByte, byte_to_name: &ByteToName)
        -> Option<String>;
}

/// Recognizes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAdvanced;

impl AdvancedCodec for NoAdvanced {
    fn encode(&self, _code: &str, _name_to_byte: &NameToByte) -> Option<Byte> {
        None
    }

    fn decode(
        &self,
        _byte: Byte,
        _name_to_byte: &NameToByte,
        _byte_to_name: &ByteToName,
    ) -> Option<String> {
        None
    }
}

impl<A: AdvancedCodec + ?Sized> AdvancedCodec for &A {
    fn encode(&self, code: &str, name_to_byte: &NameToByte) -> Option<Byte> {
        (**self).encode(code, name_to_byte)
    }

    fn decode(
        &self,
        byte: Byte,
        name_to_byte: &NameToByte,
        byte_to_name: &ByteToName,
    ) -> Option<String> {
        (**self).decode(byte, name_to_byte, byte_to_name)
    }
}

impl<A: AdvancedCodec + ?Sized> AdvancedCodec for Box<A> {
    fn encode(&self, code: &str, name_to_byte: &NameToByte) -> Option<Byte> {
        (**self).encode(code, name_to_byte)
    }

    fn decode(
        &self,
        byte: Byte,
        name_to_byte: &NameToByte,
        byte_to_name: &ByteToName,
    ) -> Option<String> {
        (**self).decode(byte, name_to_byte, byte_to_name)
    }
}
