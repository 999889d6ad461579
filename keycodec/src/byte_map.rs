use std::{collections::HashMap, fmt};

use keycodec_common::{keycodes::is_sentinel, Byte};
use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};

use crate::registry::is_catalog_code;

/// A device's symbolic name to value table.
///
/// Declaration order is kept; it decides which alias names a shared value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameToByte {
    entries: Vec<(String, Byte)>,
    index: HashMap<String, usize>,
}

impl NameToByte {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds `name`. Re-declaring a name replaces its value but keeps its
    /// original position.
    pub fn insert(&mut self, name: impl Into<String>, byte: Byte) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = byte,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, byte));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Byte> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Byte)> + '_ {
        self.entries.iter().map(|(n, b)| (n.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Byte)> for NameToByte {
    fn from_iter<T: IntoIterator<Item = (S, Byte)>>(iter: T) -> Self {
        let mut m = NameToByte::new();
        for (name, byte) in iter {
            m.insert(name, byte);
        }
        m
    }
}

struct NameToByteVisitor;

impl<'de> Visitor<'de> for NameToByteVisitor {
    type Value = NameToByte;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of keycode names to numeric values")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut m = NameToByte::new();
        while let Some((name, byte)) = access.next_entry::<String, Byte>()? {
            m.insert(name, byte);
        }
        Ok(m)
    }
}

impl<'de> Deserialize<'de> for NameToByte {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NameToByteVisitor)
    }
}

/// Reverse of [`NameToByte`]. Built once per table and never changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteToName {
    map: HashMap<Byte, String>,
}

impl ByteToName {
    pub fn get(&self, byte: Byte) -> Option<&str> {
        self.map.get(&byte).map(String::as_str)
    }

    pub fn contains(&self, byte: Byte) -> bool {
        self.map.contains_key(&byte)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Builds the value to name table.
///
/// The first declared name for a value is kept, except that any later catalog
/// code displaces the held name, so the last catalog code wins.
pub fn build_byte_to_name(name_to_byte: &NameToByte) -> ByteToName {
    let mut map: HashMap<Byte, String> = HashMap::with_capacity(name_to_byte.len());
    for (name, byte) in name_to_byte.iter() {
        match map.get_mut(&byte) {
            None => {
                map.insert(byte, name.to_string());
            }
            Some(held) => {
                if is_catalog_code(name) {
                    log::trace!("{byte:#x}: prefer {name} over {held}");
                    *held = name.to_string();
                } else {
                    log::trace!("{byte:#x}: {name} is an alias of {held}");
                }
            }
        }
    }
    ByteToName { map }
}

/// Table names that are neither sentinels nor catalog codes.
pub fn uncataloged_names(name_to_byte: &NameToByte) -> impl Iterator<Item = &str> + '_ {
    name_to_byte
        .iter()
        .map(|(name, _)| name)
        .filter(|name| !is_sentinel(name) && !is_catalog_code(name))
}

#[cfg(test)]
#[path = "byte_map_test.rs"]
mod test;
