use std::fmt;

use keycodec_common::{keycodes::LayerFamily, Byte};

use crate::byte_map::NameToByte;

/// A layer family's closed value range `[base, max]` on one device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerRange {
    pub base: Byte,
    pub max: Byte,
}

impl LayerRange {
    pub fn contains(&self, byte: Byte) -> bool {
        self.base <= byte && byte <= self.max
    }

    /// Highest index the device can represent.
    pub fn capacity(&self) -> Byte {
        self.max.saturating_sub(self.base)
    }

    /// Indexes past the end of the range clamp to `max`.
    pub fn encode(&self, index: Byte) -> Byte {
        self.base.saturating_add(index).min(self.max)
    }
}

/// A family plus index, written `FAMILY(index)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerCode {
    pub family: LayerFamily,
    pub index: Byte,
}

impl LayerCode {
    pub fn new(family: LayerFamily, index: Byte) -> Self {
        Self { family, index }
    }
}

impl fmt::Display for LayerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.family, self.index)
    }
}

/// Per-device ranges of the eight layer families, read from the table's
/// sentinel entries. A family without both sentinels has no range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerRanges([Option<LayerRange>; LayerFamily::ALL.len()]);

impl LayerRanges {
    pub fn from_table(name_to_byte: &NameToByte) -> Self {
        let mut ranges = [None; LayerFamily::ALL.len()];
        for family in LayerFamily::ALL {
            let base = name_to_byte.get(family.base_sentinel());
            let max = name_to_byte.get(family.max_sentinel());
            ranges[family.index()] = match (base, max) {
                (Some(base), Some(max)) => {
                    if base > max {
                        log::warn!("{family} range is empty: base {base:#x} > max {max:#x}");
                    }
                    Some(LayerRange { base, max })
                }
                (None, None) => None,
                _ => {
                    log::warn!("{family} is missing one of its range sentinels");
                    None
                }
            };
        }

        let ranges = Self(ranges);
        ranges.warn_overlaps();
        ranges
    }

    fn warn_overlaps(&self) {
        let present: Vec<_> = self.iter().collect();
        for (i, (fa, a)) in present.iter().enumerate() {
            for (fb, b) in &present[i + 1..] {
                if a.base <= b.max && b.base <= a.max {
                    log::warn!("{fa} and {fb} ranges overlap; {fa} takes the shared values");
                }
            }
        }
    }

    pub fn get(&self, family: LayerFamily) -> Option<LayerRange> {
        self.0[family.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LayerFamily, LayerRange)> + '_ {
        LayerFamily::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|r| (f, r)))
    }

    pub fn encode(&self, code: LayerCode) -> Option<Byte> {
        self.get(code.family).map(|r| r.encode(code.index))
    }

    /// Decodes `byte` against the first family, in [`LayerFamily::ALL`]
    /// order, whose range holds it.
    pub fn decode(&self, byte: Byte) -> Option<LayerCode> {
        self.iter()
            .find(|(_, r)| r.contains(byte))
            .map(|(family, r)| LayerCode::new(family, byte - r.base))
    }

    pub fn contains(&self, byte: Byte) -> bool {
        self.iter().any(|(_, r)| r.contains(byte))
    }

    pub fn family_contains(&self, family: LayerFamily, byte: Byte) -> bool {
        self.get(family).is_some_and(|r| r.contains(byte))
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod test;
