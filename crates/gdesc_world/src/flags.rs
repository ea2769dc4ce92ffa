//! Per-entity flag bitsets.
//!
//! Every object, place, and variable owns a 64-bit field. Flag operations
//! take a refno of any category and route by range; refnos outside those
//! three categories are ignored.

use crate::refno::{Category, Refno, RefnoSpace};

/// Number of flag bits per entity.
pub const FLAG_BITS: u32 = 64;

/// Flag storage for objects, places, and variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagStore {
    space: RefnoSpace,
    objects: Vec<u64>,
    places: Vec<u64>,
    variables: Vec<u64>,
}

impl FlagStore {
    /// Allocates cleared flags sized to the refno space.
    #[must_use]
    pub fn new(space: RefnoSpace) -> Self {
        Self {
            space,
            objects: vec![0; space.count(Category::Object)],
            places: vec![0; space.count(Category::Place)],
            variables: vec![0; space.count(Category::Variable)],
        }
    }

    fn field(&self, refno: Refno) -> Option<&u64> {
        match self.space.index_of(refno)? {
            (Category::Object, i) => self.objects.get(i),
            (Category::Place, i) => self.places.get(i),
            (Category::Variable, i) => self.variables.get(i),
            _ => None,
        }
    }

    fn field_mut(&mut self, refno: Refno) -> Option<&mut u64> {
        match self.space.index_of(refno)? {
            (Category::Object, i) => self.objects.get_mut(i),
            (Category::Place, i) => self.places.get_mut(i),
            (Category::Variable, i) => self.variables.get_mut(i),
            _ => None,
        }
    }

    fn mask(bit: i32) -> Option<u64> {
        u32::try_from(bit)
            .ok()
            .filter(|b| *b < FLAG_BITS)
            .map(|b| 1u64 << b)
    }

    /// Tests a flag bit. Unflaggable refnos and out-of-range bits read as clear.
    #[must_use]
    pub fn test(&self, refno: Refno, bit: i32) -> bool {
        match (self.field(refno), Self::mask(bit)) {
            (Some(field), Some(mask)) => field & mask != 0,
            _ => false,
        }
    }

    /// Sets a flag bit.
    pub fn set(&mut self, refno: Refno, bit: i32) {
        if let (Some(mask), Some(field)) = (Self::mask(bit), self.field_mut(refno)) {
            *field |= mask;
        }
    }

    /// Clears a flag bit.
    pub fn clear(&mut self, refno: Refno, bit: i32) {
        if let (Some(mask), Some(field)) = (Self::mask(bit), self.field_mut(refno)) {
            *field &= !mask;
        }
    }

    /// Raw bitset of an entity, or 0 for unflaggable refnos.
    #[must_use]
    pub fn bits(&self, refno: Refno) -> u64 {
        self.field(refno).copied().unwrap_or(0)
    }
}
