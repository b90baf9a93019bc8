//! Strongly typed, zero-cost identifier wrappers.
//!
//! Junction, road, and lane identifiers are issued by the external traffic
//! simulator and stay strings inside [`Topology`](crate::Topology).  The IDs
//! here index *our own* tables: the enumerated action space and the
//! lane-group slots of the state vector.  All IDs are `Copy + Ord + Hash` so
//! they can be used as map keys and sorted collection elements without
//! ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index into the enumerated action table.  `u16` is ample: even a
    /// four-junction network with 8 green phases each is only 4096 actions.
    pub struct ActionId(u16);
}

typed_id! {
    /// Index of a lane group — one slot of the aggregate state vector.
    pub struct GroupId(u16);
}
