//! The codec for whichever keyboard is currently selected.

use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    advanced::{AdvancedCodec, NoAdvanced},
    byte_map::NameToByte,
    codec::KeycodeCodec,
};

/// Holds the current device's codec. Selecting a device builds a complete
/// codec before swapping it in, so readers see either the old tables or the
/// new ones, never a mix. A snapshot stays valid after later loads.
#[derive(Debug, Default)]
pub struct Session<A = NoAdvanced> {
    advanced: A,
    current: RwLock<Option<Arc<KeycodeCodec<A>>>>,
}

impl Session<NoAdvanced> {
    pub fn new() -> Self {
        Self::with_advanced(NoAdvanced)
    }
}

impl<A: AdvancedCodec + Clone> Session<A> {
    pub fn with_advanced(advanced: A) -> Self {
        Self {
            advanced,
            current: RwLock::new(None),
        }
    }

    /// Replaces the current codec with one built from `table`.
    pub fn load(&self, table: NameToByte) -> Arc<KeycodeCodec<A>> {
        let codec = Arc::new(KeycodeCodec::with_advanced(table, self.advanced.clone()));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(codec.clone());
        codec
    }

    /// Forgets the current device.
    pub fn clear(&self) {
        log::debug!("session cleared");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn snapshot(&self) -> Option<Arc<KeycodeCodec<A>>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod test;
