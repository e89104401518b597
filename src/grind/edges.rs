//! Boundary search for literal runs.
//!
//! A run left over after the special classes have been applied may grow
//! outward over code points that are already in the target, as long as it
//! does not cross its neighbour or leave the target. Growing is only worth
//! it when the new edge is cheaper to write or less ugly, so for every edge
//! we keep the original position plus each position that strictly improves
//! on the best one seen so far.

use super::Config;
use crate::range::{CharSet, Interval, MAX_CODE_POINT};
use crate::serialize::escape::{class_char_len, may_be_escaped, utf8_width};

/// Penalties for code points that are awkward to read in a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ugliness {
    pub tab: u32,
    /// C0 controls, DEL and C1 controls.
    pub control: u32,
    pub surrogate: u32,
}

impl Default for Ugliness {
    fn default() -> Self {
        Self {
            tab: 1,
            control: 2,
            surrogate: 3,
        }
    }
}

impl Ugliness {
    pub fn score(&self, cp: u32) -> u32 {
        match cp {
            0x09 => self.tab,
            0x00..=0x1F | 0x7F..=0x9F => self.control,
            0xD800..=0xDFFF => self.surrogate,
            _ => 0,
        }
    }
}

/// Ordering key of an edge: escaped byte length, then ugliness.
pub type EdgeKey = (usize, u32);

const BEST_KEY: EdgeKey = (1, 0);

pub fn edge_key(cp: u32, config: &Config) -> EdgeKey {
    (
        class_char_len(cp, config.get_escape_slash()),
        config.get_ugliness().score(cp),
    )
}

/// First code point with the same UTF-8 width as `cp`.
fn width_floor(cp: u32) -> u32 {
    match utf8_width(cp) {
        1 => 0,
        2 => 0x80,
        _ => 0x800,
    }
}

/// Candidate positions for the left edge of a run starting at `from`,
/// scanning down to `lower` (inclusive).
pub fn left_edges(from: u32, lower: u32, config: &Config) -> Vec<u32> {
    let mut best = edge_key(from, config);
    let mut res = vec![from];

    let mut cp = from;
    while cp > lower && best != BEST_KEY {
        cp -= 1;
        let key = edge_key(cp, config);
        if key < best {
            best = key;
            res.push(cp);
        }

        // nothing else of this width can beat (width, 0)
        let width = utf8_width(cp);
        if best <= (width, 0) {
            cp = width_floor(cp).max(lower);
        }
    }

    res
}

/// Candidate positions for the right edge of a run ending at `to`,
/// scanning up to `upper` (inclusive).
pub fn right_edges(to: u32, upper: u32, config: &Config) -> Vec<u32> {
    let mut best = edge_key(to, config);
    let mut res = vec![to];

    let mut cp = to;
    while cp < upper {
        cp += 1;
        // widths only grow from here on
        if (utf8_width(cp), 0) >= best {
            break;
        }
        let key = edge_key(cp, config);
        if key < best {
            best = key;
            res.push(cp);
        }
    }

    res
}

/// All edge choices for one residual run.
#[derive(Clone, Debug)]
pub struct RunEdges {
    pub run: Interval,
    pub left: Vec<u32>,
    pub right: Vec<u32>,
}

impl RunEdges {
    /// `lower` and `upper` are the furthest points the edges may move to.
    pub fn new(run: Interval, lower: u32, upper: u32, config: &Config) -> Self {
        Self {
            run,
            left: left_edges(run.from(), lower, config),
            right: right_edges(run.to(), upper, config),
        }
    }
}

/// Code point bands of equal UTF-8 width, narrowest first.
const WIDTH_BANDS: [(u32, u32); 3] = [(0, 0x7F), (0x80, 0x7FF), (0x800, MAX_CODE_POINT)];

/// Up to `amount` points of `free`, cheapest first. Narrower UTF-8 widths
/// come first, and within a width the points that never need escaping
/// come before those that may.
pub fn cheapest_points(free: &[Interval], amount: usize) -> Vec<u32> {
    let mut res = Vec::with_capacity(amount);

    for (lo, hi) in WIDTH_BANDS {
        let mut escaped = Vec::new();
        for interval in free {
            for cp in interval.from().max(lo)..=interval.to().min(hi) {
                if res.len() == amount {
                    return res;
                }
                if may_be_escaped(cp) {
                    escaped.push(cp);
                } else {
                    res.push(cp);
                }
            }
        }
        let room = amount - res.len();
        res.extend(escaped.into_iter().take(room));
    }

    res
}

impl CharSet {
    /// Up to `amount` code points outside this set that are cheapest to
    /// write, for allocating placeholder characters.
    pub fn best_free_points(&self, amount: usize) -> Vec<u32> {
        cheapest_points(self.invert().intervals(), amount)
    }
}
