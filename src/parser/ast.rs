use crate::range::special::{get, ClassKind};
use crate::range::{CharSet, Interval};
use crate::Error;

/// A parsed single-character fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Char(u32),
    Class(ClassKind),
    Bracket { negated: bool, items: Vec<ClassItem> },
    Or(Vec<Ast>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassItem {
    Char(u32),
    Range(u32, u32),
    Class(ClassKind),
}

const DASH: u32 = 0x2D;

impl ClassItem {
    pub(super) fn join(mut head: Vec<ClassItem>, tail: Vec<ClassItem>) -> Vec<ClassItem> {
        head.extend(tail);
        head
    }

    /// `a-b`. With a class on either side the dash is literal.
    pub(super) fn range(from: ClassItem, to: ClassItem) -> Result<Vec<ClassItem>, Error> {
        match (from, to) {
            (Self::Char(from), Self::Char(to)) if from > to => {
                Err(Error::InvalidRange { from, to })
            }
            (Self::Char(from), Self::Char(to)) => Ok(vec![Self::Range(from, to)]),
            (from, to) => Ok(vec![from, Self::Char(DASH), to]),
        }
    }

    fn intervals(&self) -> Vec<Interval> {
        match *self {
            Self::Char(c) => vec![Interval::new_unchecked(c, c)],
            Self::Range(from, to) => vec![Interval::new_unchecked(from, to)],
            Self::Class(kind) => get(kind).subranges().to_vec(),
        }
    }
}

impl Ast {
    pub fn parse(code: &str) -> Result<Self, Error> {
        super::parse(code)
    }

    pub(super) fn or(lhs: Ast, rhs: Ast) -> Self {
        if let Self::Or(mut inner) = lhs {
            inner.push(rhs);
            Self::Or(inner)
        } else {
            Self::Or(vec![lhs, rhs])
        }
    }

    /// The code points this fragment matches, computed from the AST
    /// alone.
    pub fn to_char_set(&self) -> CharSet {
        match self {
            Self::Char(c) => CharSet::new([Interval::new_unchecked(*c, *c)]),
            Self::Class(kind) => CharSet::new(get(*kind).subranges().iter().copied()),
            Self::Bracket { negated, items } => {
                let set = CharSet::new(items.iter().flat_map(ClassItem::intervals));
                if *negated {
                    set.invert()
                } else {
                    set
                }
            }
            Self::Or(branches) => CharSet::new(
                branches
                    .iter()
                    .flat_map(|b| b.to_char_set().intervals().to_vec()),
            ),
        }
    }
}
