pub mod algebra;
pub mod special;

use std::fmt;

use crate::Error;

pub use special::{ClassKind, SpecialClass};

/// The largest code point this crate deals with. Everything is a UTF-16
/// code unit; surrogates are never paired.
pub const MAX_CODE_POINT: u32 = 0xFFFF;

/// An inclusive range of code points.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    from: u32,
    to: u32,
}

impl Interval {
    pub fn new(from: u32, to: u32) -> Result<Self, Error> {
        if from > to || to > MAX_CODE_POINT {
            return Err(Error::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn point(cp: u32) -> Result<Self, Error> {
        if cp > MAX_CODE_POINT {
            return Err(Error::InvalidCodePoint(cp));
        }
        Ok(Self { from: cp, to: cp })
    }

    /// Bounds must already be known to be valid.
    pub(crate) const fn new_unchecked(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> u32 {
        self.from
    }

    pub fn to(&self) -> u32 {
        self.to
    }

    /// Number of code points covered.
    pub fn len(&self) -> u32 {
        self.to - self.from + 1
    }

    pub fn contains_point(&self, cp: u32) -> bool {
        self.from <= cp && cp <= self.to
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.to >= other.from && self.from <= other.to
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "[{:04X}]", self.from)
        } else {
            write!(f, "[{:04X}-{:04X}]", self.from, self.to)
        }
    }
}

/// One member of a decomposition: either a plain interval or a reference to
/// one of the built-in classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    Literal(Interval),
    Special(&'static SpecialClass),
}

impl Element {
    /// The intervals this element denotes.
    pub fn subranges(&self) -> &[Interval] {
        match self {
            Element::Literal(interval) => std::slice::from_ref(interval),
            Element::Special(class) => class.subranges(),
        }
    }

    /// Total number of code points denoted.
    pub fn size(&self) -> u32 {
        self.subranges().iter().map(Interval::len).sum()
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Element::Special(_))
    }
}

impl From<Interval> for Element {
    fn from(interval: Interval) -> Self {
        Element::Literal(interval)
    }
}

impl From<&'static SpecialClass> for Element {
    fn from(class: &'static SpecialClass) -> Self {
        Element::Special(class)
    }
}

/// A set of code points in canonical form: sorted intervals that neither
/// overlap nor touch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CharSet {
    ranges: Vec<Interval>,
}

impl CharSet {
    pub fn new<T: IntoIterator<Item = Interval>>(intervals: T) -> Self {
        Self {
            ranges: algebra::canonicalize(intervals.into_iter().collect()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn full() -> Self {
        Self {
            ranges: vec![Interval::new_unchecked(0, MAX_CODE_POINT)],
        }
    }

    /// The set of UTF-16 code units used by `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.encode_utf16()
                .map(|unit| Interval::new_unchecked(unit as u32, unit as u32)),
        )
    }

    pub fn from_code_points<T: IntoIterator<Item = u32>>(points: T) -> Result<Self, Error> {
        let intervals = points
            .into_iter()
            .map(Interval::point)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(intervals))
    }

    /// The union of the given elements.
    pub fn from_elements(elements: &[Element]) -> Self {
        Self {
            ranges: algebra::canonicalize(algebra::flatten(elements)),
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.ranges
    }

    /// The set as a list of literal elements.
    pub fn elements(&self) -> Vec<Element> {
        self.ranges.iter().copied().map(Element::Literal).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of code points in the set.
    pub fn len(&self) -> u32 {
        self.ranges.iter().map(Interval::len).sum()
    }

    pub fn contains_point(&self, cp: u32) -> bool {
        self.ranges
            .binary_search_by(|r| {
                if r.to < cp {
                    std::cmp::Ordering::Less
                } else if r.from > cp {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Whether every point of `interval` is in the set.
    pub fn contains_interval(&self, interval: &Interval) -> bool {
        let i = self.ranges.partition_point(|r| r.to < interval.from);
        self.ranges
            .get(i)
            .map_or(false, |r| r.from <= interval.from && interval.to <= r.to)
    }

    pub fn invert(&self) -> Self {
        Self {
            ranges: algebra::invert(&self.elements()),
        }
    }

    pub fn points(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|r| r.from..=r.to)
    }
}

#[cfg(test)]
mod tests {
    use super::{CharSet, Element, Error, Interval};

    #[test]
    fn interval_bounds() {
        assert_eq!(
            Interval::new(5, 4),
            Err(Error::InvalidRange { from: 5, to: 4 })
        );
        assert_eq!(
            Interval::new(0, 0x10000),
            Err(Error::InvalidRange {
                from: 0,
                to: 0x10000
            })
        );
        assert_eq!(Interval::point(0x10000), Err(Error::InvalidCodePoint(0x10000)));
        assert_eq!(Interval::new(0x61, 0x7A).unwrap().len(), 26);
    }

    #[test]
    fn set_from_text() {
        let set = CharSet::from_text("cabbage");
        assert_eq!(
            set.intervals(),
            &[
                Interval::new(0x61, 0x63).unwrap(),
                Interval::new(0x65, 0x65).unwrap(),
                Interval::new(0x67, 0x67).unwrap()
            ]
        );
        assert!(set.contains_point(0x62));
        assert!(!set.contains_point(0x64));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn astral_text_yields_both_surrogates() {
        let set = CharSet::from_text("\u{1F600}");
        assert_eq!(set.points().collect::<Vec<_>>(), vec![0xD83D, 0xDE00]);
    }

    #[test]
    fn from_code_points_validates() {
        assert_eq!(
            CharSet::from_code_points([0x41, 0x1_0000]),
            Err(Error::InvalidCodePoint(0x1_0000))
        );
        let set = CharSet::from_code_points([0x42, 0x41]).unwrap();
        assert_eq!(set.elements(), vec![Element::Literal(Interval::new(0x41, 0x42).unwrap())]);
    }

    #[test]
    fn invert_full_and_empty() {
        assert_eq!(CharSet::full().invert(), CharSet::empty());
        assert_eq!(CharSet::empty().invert(), CharSet::full());
    }
}
