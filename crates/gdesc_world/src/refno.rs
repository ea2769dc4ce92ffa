//! Reference numbers: the single integer handle space for declared entities.
//!
//! Refnos are assigned in one pass in a fixed category order: objects,
//! places, variables, texts, verbs. Refno 0 means "none". The five ranges
//! are contiguous and gapless, so a refno's category is decided purely by
//! which range boundary it falls under.

use std::fmt;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An entity handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Refno(i32);

impl Refno {
    /// The reserved "none" handle.
    pub const NONE: Self = Self(0);

    /// Wraps a raw integer.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Returns true for the reserved "none" handle.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Refno {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<Refno> for i32 {
    fn from(refno: Refno) -> Self {
        refno.0
    }
}

impl fmt::Display for Refno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The five entity categories, in refno assignment order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Category {
    /// Portable things.
    Object,
    /// Locations.
    Place,
    /// Global integer cells.
    Variable,
    /// Text templates, named or anonymous.
    Text,
    /// Vocabulary verbs.
    Verb,
}

impl Category {
    /// All categories in assignment order.
    pub const ALL: [Self; 5] = [
        Self::Object,
        Self::Place,
        Self::Variable,
        Self::Text,
        Self::Verb,
    ];

    const fn slot(self) -> usize {
        match self {
            Self::Object => 0,
            Self::Place => 1,
            Self::Variable => 2,
            Self::Text => 3,
            Self::Verb => 4,
        }
    }

    /// Lowercase keyword used in game source (`object`, `place`, ...).
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Place => "place",
            Self::Variable => "variable",
            Self::Text => "text",
            Self::Verb => "verb",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The five category ranges, recorded once at load.
///
/// Each range is half-open; the first starts at 1 and every following range
/// starts where the previous one ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefnoSpace {
    ends: [i32; 5],
}

impl RefnoSpace {
    /// Lays out the ranges for the given per-category counts.
    ///
    /// Counts are in [`Category::ALL`] order.
    #[must_use]
    pub fn from_counts(counts: [usize; 5]) -> Self {
        let mut ends = [0; 5];
        let mut next: i32 = 1;
        for (end, count) in ends.iter_mut().zip(counts) {
            next = next.saturating_add(i32::try_from(count).unwrap_or(i32::MAX));
            *end = next;
        }
        Self { ends }
    }

    /// The half-open refno range of a category.
    #[must_use]
    pub fn range(&self, category: Category) -> Range<i32> {
        let slot = category.slot();
        let start = if slot == 0 { 1 } else { self.ends[slot - 1] };
        start..self.ends[slot]
    }

    /// First refno of a category.
    #[must_use]
    pub fn first(&self, category: Category) -> Refno {
        Refno(self.range(category).start)
    }

    /// Number of entities in a category.
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.range(category).len()
    }

    /// One past the highest assigned refno.
    #[must_use]
    pub const fn end(&self) -> i32 {
        self.ends[4]
    }

    /// Category of a refno, or `None` for 0, negatives, and out-of-range values.
    #[must_use]
    pub fn category_of(&self, refno: Refno) -> Option<Category> {
        if refno.0 < 1 {
            return None;
        }
        Category::ALL
            .into_iter()
            .find(|category| refno.0 < self.ends[category.slot()])
    }

    /// Category and dense index of a refno.
    #[must_use]
    pub fn index_of(&self, refno: Refno) -> Option<(Category, usize)> {
        let category = self.category_of(refno)?;
        let offset = refno.0 - self.range(category).start;
        usize::try_from(offset).ok().map(|index| (category, index))
    }

    /// Dense index of a refno within the given category, if it belongs there.
    #[must_use]
    pub fn index_in(&self, category: Category, refno: Refno) -> Option<usize> {
        match self.index_of(refno) {
            Some((found, index)) if found == category => Some(index),
            _ => None,
        }
    }

    /// Refno of the `index`th entity of a category.
    #[must_use]
    pub fn refno(&self, category: Category, index: usize) -> Refno {
        let start = self.range(category).start;
        Refno(start.saturating_add(i32::try_from(index).unwrap_or(i32::MAX)))
    }

    /// True if the refno lies in the given category.
    #[must_use]
    pub fn contains(&self, category: Category, refno: Refno) -> bool {
        self.range(category).contains(&refno.0)
    }
}
