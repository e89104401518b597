//! Set operations over lists of [`Element`]s.
//!
//! None of these functions mutate their inputs. Results are plain interval
//! lists in canonical order: sorted, non-overlapping and non-adjacent.

use super::{Element, Interval, MAX_CODE_POINT};

/// Expand every special class into its subranges.
pub fn flatten(set: &[Element]) -> Vec<Interval> {
    set.iter().flat_map(|e| e.subranges().iter().copied()).collect()
}

/// Sort the intervals and merge the ones that overlap or touch.
pub fn canonicalize(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_unstable();

    let mut res: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match res.last_mut() {
            Some(last) if interval.from <= last.to.saturating_add(1) => {
                last.to = last.to.max(interval.to);
            }
            _ => res.push(interval),
        }
    }
    res
}

/// `flatten(set) \ flatten(reference)`.
pub fn subtract(set: &[Element], reference: &[Element]) -> Vec<Interval> {
    let mut current = flatten(set);

    for cut in flatten(reference) {
        // back to front, so splicing at `i` never moves what is left to scan
        let mut i = current.len();
        while i > 0 {
            i -= 1;
            let interval = current[i];
            if !interval.overlaps(&cut) {
                continue;
            }

            let left = (interval.from < cut.from)
                .then(|| Interval::new_unchecked(interval.from, cut.from - 1));
            let right = (interval.to > cut.to)
                .then(|| Interval::new_unchecked(cut.to + 1, interval.to));
            current.splice(i..=i, left.into_iter().chain(right));
        }
    }

    canonicalize(current)
}

/// Everything in `0..=0xFFFF` not covered by `set`.
pub fn invert(set: &[Element]) -> Vec<Interval> {
    subtract(
        &[Element::Literal(Interval::new_unchecked(0, MAX_CODE_POINT))],
        set,
    )
}

pub fn union(a: &[Element], b: &[Element]) -> Vec<Interval> {
    let mut all = flatten(a);
    all.extend(flatten(b));
    canonicalize(all)
}

/// Whether every code point of `element` is covered by `container`.
pub fn contains(element: &Element, container: &[Element]) -> bool {
    match element {
        Element::Literal(_) => subtract(std::slice::from_ref(element), container).is_empty(),
        Element::Special(class) => class
            .subranges()
            .iter()
            .all(|r| contains(&Element::Literal(*r), container)),
    }
}

/// Whether `element` shares at least one code point with `other`.
pub fn intersects(element: &Element, other: &[Element]) -> bool {
    match element {
        Element::Special(class) => class
            .subranges()
            .iter()
            .any(|r| intersects(&Element::Literal(*r), other)),
        Element::Literal(interval) => other.iter().any(|o| match o {
            Element::Literal(b) => interval.overlaps(b),
            Element::Special(class) => class.subranges().iter().any(|b| interval.overlaps(b)),
        }),
    }
}
