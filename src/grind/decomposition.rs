use super::{Config, Polarity};
use crate::range::algebra::contains;
use crate::range::{CharSet, Element};
use crate::{serialize, Error};

/// A covering of a set by intervals and special classes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition {
    elements: Vec<Element>,
}

impl Decomposition {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn union(&self) -> CharSet {
        CharSet::from_elements(&self.elements)
    }

    /// No element is covered by the union of the others.
    pub fn is_irredundant(&self) -> bool {
        let mut others = Vec::with_capacity(self.elements.len());
        (0..self.elements.len()).all(|i| {
            others.clear();
            others.extend(
                self.elements
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, e)| *e),
            );
            !contains(&self.elements[i], &others)
        })
    }

    /// Some special class appears together with its inverse.
    pub fn is_contradictory(&self) -> bool {
        let specials = || {
            self.elements.iter().filter_map(|e| match e {
                Element::Special(class) => Some(*class),
                Element::Literal(_) => None,
            })
        };
        specials().any(|a| specials().any(|b| a.inverse() == b))
    }

    /// Whether this is a valid decomposition of `target`.
    pub fn is_valid_for(&self, target: &CharSet) -> bool {
        !self.is_empty()
            && self.union() == *target
            && !self.is_contradictory()
            && self.is_irredundant()
    }

    /// Render as the shortest pattern fragment for `polarity`.
    pub fn serialize(&self, polarity: Polarity, config: &Config) -> Result<String, Error> {
        serialize::serialize(&self.elements, polarity, config)
    }
}
