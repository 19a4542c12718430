//! Opaque ID newtypes.
//!
//! Each ID is a thin `u32` wrapper that is `Copy`, `Ord`, and
//! `Serialize`/`Deserialize`.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the index as a `usize`, for slice lookups.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Index of one symbol in an enumeration alphabet.
    ///
    /// Symbols are ordered, and enumerated candidates keep their symbols in
    /// non-decreasing order so each multiset has a single representative.
    SymbolId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip() {
        let id = SymbolId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn ids_order_by_index() {
        assert!(SymbolId::from_raw(1) < SymbolId::from_raw(2));
    }

    #[test]
    fn id_serde_roundtrip() {
        let id = SymbolId::from_raw(7);
        let json = serde_json::to_string(&id).unwrap();
        let restored: SymbolId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
