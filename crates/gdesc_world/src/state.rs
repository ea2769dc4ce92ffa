//! Mutable runtime state.
//!
//! Everything a running game can change lives here: variable cells, object
//! locations, array cells, flag bits, resolved state values, and the
//! selection cursors of multi-alternative texts. Declarations themselves
//! never change after binding.

use crate::bind::BoundWorld;
use crate::flags::FlagStore;
use crate::refno::{Category, Refno, RefnoSpace};

/// The mutable slice of a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldState {
    space: RefnoSpace,
    variables: Vec<i32>,
    locations: Vec<Refno>,
    arrays: Vec<Vec<i32>>,
    flags: FlagStore,
    states: Vec<i32>,
    text_cursors: Vec<usize>,
}

impl WorldState {
    /// Allocates zeroed state for a bound world. Every object starts in `ylem`.
    #[must_use]
    pub fn new(world: &BoundWorld) -> Self {
        let space = *world.space();
        let model = world.model();
        Self {
            space,
            variables: vec![0; space.count(Category::Variable)],
            locations: vec![world.defaults().ylem; space.count(Category::Object)],
            arrays: model.arrays.iter().map(|a| vec![0; a.size]).collect(),
            flags: FlagStore::new(space),
            states: vec![0; model.states.len()],
            text_cursors: vec![0; world.text_count()],
        }
    }

    /// Value of the variable at `refno`.
    #[must_use]
    pub fn variable(&self, refno: Refno) -> Option<i32> {
        let index = self.space.index_in(Category::Variable, refno)?;
        self.variables.get(index).copied()
    }

    /// Stores into the variable at `refno`. Returns false if `refno` is not a variable.
    pub fn set_variable(&mut self, refno: Refno, value: i32) -> bool {
        let Some(index) = self.space.index_in(Category::Variable, refno) else {
            return false;
        };
        match self.variables.get_mut(index) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Current location of an object.
    #[must_use]
    pub fn location(&self, object: Refno) -> Option<Refno> {
        let index = self.space.index_in(Category::Object, object)?;
        self.locations.get(index).copied()
    }

    /// Moves an object. Returns false if `object` is not an object refno.
    pub fn set_location(&mut self, object: Refno, container: Refno) -> bool {
        let Some(index) = self.space.index_in(Category::Object, object) else {
            return false;
        };
        match self.locations.get_mut(index) {
            Some(slot) => {
                *slot = container;
                true
            }
            None => false,
        }
    }

    /// Objects currently at `container`, in declaration order.
    #[must_use]
    pub fn objects_at(&self, container: Refno) -> Vec<Refno> {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, at)| **at == container)
            .map(|(i, _)| self.space.refno(Category::Object, i))
            .collect()
    }

    /// Cells of the array with the given index.
    #[must_use]
    pub fn array(&self, index: usize) -> Option<&[i32]> {
        self.arrays.get(index).map(Vec::as_slice)
    }

    /// Mutable cells of the array with the given index.
    pub fn array_mut(&mut self, index: usize) -> Option<&mut [i32]> {
        self.arrays.get_mut(index).map(Vec::as_mut_slice)
    }

    /// Flag bits.
    #[must_use]
    pub fn flags(&self) -> &FlagStore {
        &self.flags
    }

    /// Mutable flag bits.
    pub fn flags_mut(&mut self) -> &mut FlagStore {
        &mut self.flags
    }

    /// Tests a flag bit on any refno.
    #[must_use]
    pub fn test_flag(&self, refno: Refno, bit: i32) -> bool {
        self.flags.test(refno, bit)
    }

    /// Sets a flag bit on any refno.
    pub fn set_flag(&mut self, refno: Refno, bit: i32) {
        self.flags.set(refno, bit);
    }

    /// Clears a flag bit on any refno.
    pub fn clear_flag(&mut self, refno: Refno, bit: i32) {
        self.flags.clear(refno, bit);
    }

    /// Resolved value of the state with the given index.
    #[must_use]
    pub fn state(&self, index: usize) -> Option<i32> {
        self.states.get(index).copied()
    }

    /// Records the resolved value of a state.
    pub fn set_state(&mut self, index: usize, value: i32) {
        if let Some(slot) = self.states.get_mut(index) {
            *slot = value;
        }
    }

    /// Selection cursor of the text with the given dense index.
    #[must_use]
    pub fn text_cursor(&self, index: usize) -> usize {
        self.text_cursors.get(index).copied().unwrap_or(0)
    }

    /// Moves the selection cursor of a text.
    pub fn set_text_cursor(&mut self, index: usize, cursor: usize) {
        if let Some(slot) = self.text_cursors.get_mut(index) {
            *slot = cursor;
        }
    }
}
