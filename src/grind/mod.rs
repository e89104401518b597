//! The combination search.
//!
//! For a target set we first pick every useful subset of the built-in
//! classes, then cover what they leave over with literal intervals, trying
//! every boundary the [`edges`] search proposes and every way of merging
//! neighbouring runs. Both phases run off explicit stacks, so a [`Grind`]
//! is a lazy iterator that never recurses.

mod decomposition;
pub mod edges;

use log::{debug, trace};

use crate::range::algebra::{contains, intersects, subtract};
use crate::range::{special, CharSet, Element, Interval, SpecialClass};
use crate::Error;

pub use decomposition::Decomposition;
pub use edges::Ugliness;

use edges::RunEdges;

/// Whether a fragment should match the target itself or everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Direct,
    Negated,
}

/// Knobs for the search and the serializer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    limit: Option<usize>,
    ugliness: Ugliness,
    escape_slash: bool,
    expand_unbracketable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            limit: None,
            ugliness: Ugliness::default(),
            escape_slash: true,
            expand_unbracketable: true,
        }
    }

    /// Stop after this many candidates. Unlimited by default.
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn ugliness(mut self, ugliness: Ugliness) -> Self {
        self.ugliness = ugliness;
        self
    }

    /// Escape `/` so the fragment can sit between `/` delimiters. On by
    /// default.
    pub fn escape_slash(mut self, yes: bool) -> Self {
        self.escape_slash = yes;
        self
    }

    /// Write `.` out as its ranges when it has to appear inside a negated
    /// class. When off, such decompositions are not produced and
    /// serializing one fails with [`Error::Unsupported`]. On by default.
    pub fn expand_unbracketable(mut self, yes: bool) -> Self {
        self.expand_unbracketable = yes;
        self
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_ugliness(&self) -> Ugliness {
        self.ugliness
    }

    pub fn get_escape_slash(&self) -> bool {
        self.escape_slash
    }

    pub fn get_expand_unbracketable(&self) -> bool {
        self.expand_unbracketable
    }
}

/// One way of writing the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    decomposition: Decomposition,
    source: String,
    polarity: Polarity,
}

impl Candidate {
    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    /// The pattern fragment, without delimiters or flags.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Whether the fragment is meant to match `cp`.
    pub fn matches(&self, cp: u32) -> bool {
        let inside = self.decomposition.union().contains_point(cp);
        match self.polarity {
            Polarity::Direct => inside,
            Polarity::Negated => !inside,
        }
    }

    pub fn into_source(self) -> String {
        self.source
    }
}

/// Entry point for searches sharing one [`Config`].
#[derive(Clone, Debug, Default)]
pub struct Grinder {
    config: Config,
}

impl Grinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All candidates for `target`.
    pub fn grind(&self, target: &CharSet, polarity: Polarity) -> Grind {
        Grind::new(target.clone(), polarity, self.config.clone())
    }

    /// All candidates for the code units used in `text`.
    pub fn grind_str(&self, text: &str, polarity: Polarity) -> Grind {
        self.grind(&CharSet::from_text(text), polarity)
    }

    /// Every fragment matching anything but `target`: first the negated
    /// classes built from `target`, then direct ones built from its
    /// complement.
    pub fn exclude(&self, target: &CharSet) -> std::iter::Chain<Grind, Grind> {
        self.grind(target, Polarity::Negated)
            .chain(self.grind(&target.invert(), Polarity::Direct))
    }
}

#[derive(Debug)]
struct ClassFrame {
    depth: usize,
    chosen: Vec<&'static SpecialClass>,
}

#[derive(Debug)]
struct LiteralFrame {
    index: usize,
    accepted: Vec<Interval>,
    merge: bool,
}

/// Literal refinement for one choice of special classes.
#[derive(Debug)]
struct LiteralPhase {
    chosen: Vec<&'static SpecialClass>,
    runs: Vec<RunEdges>,
    stack: Vec<LiteralFrame>,
}

impl LiteralPhase {
    fn new(chosen: Vec<&'static SpecialClass>, target: &CharSet, config: &Config) -> Self {
        let specials: Vec<Element> = chosen.iter().copied().map(Element::Special).collect();
        let residual = subtract(&target.elements(), &specials);

        let runs: Vec<RunEdges> = residual
            .iter()
            .enumerate()
            .map(|(i, run)| {
                let (lower, upper) = outer_limits(target, &residual, i);
                RunEdges::new(*run, lower, upper, config)
            })
            .collect();

        trace!(
            "classes {:?}: {} residual runs",
            chosen.iter().map(|c| c.kind()).collect::<Vec<_>>(),
            runs.len()
        );

        Self {
            chosen,
            runs,
            stack: vec![LiteralFrame {
                index: 0,
                accepted: vec![],
                merge: false,
            }],
        }
    }

    /// Advance until the next complete element list, if any.
    fn next(&mut self, target: &CharSet) -> Option<Vec<Element>> {
        while let Some(frame) = self.stack.pop() {
            if frame.index == self.runs.len() {
                if frame.merge {
                    continue;
                }
                let mut elements: Vec<Element> =
                    self.chosen.iter().copied().map(Element::Special).collect();
                elements.extend(frame.accepted.into_iter().map(Element::Literal));
                if elements.is_empty() {
                    continue;
                }
                return Some(elements);
            }

            let edges = &self.runs[frame.index];
            let mut children = Vec::new();

            if frame.merge {
                let Some(last) = frame.accepted.last() else {
                    continue;
                };
                for &right in &edges.right {
                    let merged = Interval::new_unchecked(last.from(), right);
                    if !target.contains_interval(&merged) {
                        continue;
                    }
                    let mut accepted = frame.accepted.clone();
                    if let Some(slot) = accepted.last_mut() {
                        *slot = merged;
                    }
                    children.push(accepted);
                }
            } else {
                for &left in &edges.left {
                    for &right in &edges.right {
                        let mut accepted = frame.accepted.clone();
                        accepted.push(Interval::new_unchecked(left, right));
                        children.push(accepted);
                    }
                }
            }

            let index = frame.index + 1;
            // a merge drops the right edge, so only the unmoved one may merge
            let original_right = edges.run.to();
            // pushed in reverse so they pop in the order they were built
            for accepted in children.into_iter().rev() {
                let can_merge = self.runs.get(index).map_or(false, |next| {
                    accepted.last().map_or(false, |last| {
                        last.to() == original_right
                            && target.contains_interval(&Interval::new_unchecked(
                                last.from(),
                                next.run.to(),
                            ))
                    })
                });
                if can_merge {
                    self.stack.push(LiteralFrame {
                        index,
                        accepted: accepted.clone(),
                        merge: true,
                    });
                }
                self.stack.push(LiteralFrame {
                    index,
                    accepted,
                    merge: false,
                });
            }
        }

        None
    }
}

/// How far run `i` of `residual` may grow: not past its neighbours and
/// not out of the target interval that holds it.
fn outer_limits(target: &CharSet, residual: &[Interval], i: usize) -> (u32, u32) {
    let run = residual[i];
    let ranges = target.intervals();
    let holder = ranges.partition_point(|r| r.to() < run.from());
    let (mut lower, mut upper) = ranges
        .get(holder)
        .map_or((run.from(), run.to()), |r| (r.from(), r.to()));

    if let Some(prev) = i.checked_sub(1).map(|p| residual[p]) {
        lower = lower.max(prev.to() + 1);
    }
    if let Some(next) = residual.get(i + 1) {
        upper = upper.min(next.from() - 1);
    }
    (lower, upper)
}

/// Lazy enumeration of every candidate for one target and polarity.
#[derive(Debug)]
pub struct Grind {
    target: CharSet,
    polarity: Polarity,
    config: Config,
    classes: Vec<&'static SpecialClass>,
    class_stack: Vec<ClassFrame>,
    literal: Option<LiteralPhase>,
    emitted: usize,
}

impl Grind {
    fn new(target: CharSet, polarity: Polarity, config: Config) -> Self {
        let target_elements = target.elements();
        let mut classes: Vec<&'static SpecialClass> = special::all()
            .iter()
            .copied()
            .filter(|class| {
                !(polarity == Polarity::Negated
                    && class.not_bracketable()
                    && !config.get_expand_unbracketable())
            })
            .filter(|class| {
                let element = Element::Special(*class);
                intersects(&element, &target_elements)
                    && contains(&element, &target_elements)
            })
            .collect();
        // stable, so registration order breaks ties
        classes.sort_by_key(|class| std::cmp::Reverse(class.size()));

        debug!(
            "grinding {} code points in {} intervals, {:?}, classes {:?}",
            target.len(),
            target.intervals().len(),
            polarity,
            classes.iter().map(|c| c.kind()).collect::<Vec<_>>()
        );

        Self {
            target,
            polarity,
            config,
            classes,
            class_stack: vec![ClassFrame {
                depth: 0,
                chosen: vec![],
            }],
            literal: None,
            emitted: 0,
        }
    }

    pub fn target(&self) -> &CharSet {
        &self.target
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Next subset of special classes, depth first, leaving a class out
    /// before putting it in.
    fn next_classes(&mut self) -> Option<Vec<&'static SpecialClass>> {
        while let Some(frame) = self.class_stack.pop() {
            if frame.depth == self.classes.len() {
                return Some(frame.chosen);
            }

            let class = self.classes[frame.depth];
            let applied: Vec<Element> =
                frame.chosen.iter().copied().map(Element::Special).collect();
            let covered = contains(&Element::Special(class), &applied);
            let contradicts = frame.chosen.iter().any(|c| *c == class.inverse());

            if !covered && !contradicts {
                let mut chosen = frame.chosen.clone();
                chosen.push(class);
                self.class_stack.push(ClassFrame {
                    depth: frame.depth + 1,
                    chosen,
                });
            } else {
                trace!("pruned {:?} at depth {}", class.kind(), frame.depth);
            }
            self.class_stack.push(ClassFrame {
                depth: frame.depth + 1,
                chosen: frame.chosen,
            });
        }
        None
    }

    fn candidate(&self, elements: Vec<Element>) -> Result<Option<Candidate>, Error> {
        let decomposition = Decomposition::new(elements);
        if !decomposition.is_valid_for(&self.target) {
            trace!("dropped {:?}", decomposition.elements());
            return Ok(None);
        }
        let source = decomposition.serialize(self.polarity, &self.config)?;
        trace!("{:?} -> {}", decomposition.elements(), source);
        Ok(Some(Candidate {
            decomposition,
            source,
            polarity: self.polarity,
        }))
    }
}

impl Iterator for Grind {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.config.get_limit().map_or(false, |limit| self.emitted >= limit) {
            return None;
        }

        loop {
            if let Some(phase) = self.literal.as_mut() {
                match phase.next(&self.target) {
                    Some(elements) => match self.candidate(elements) {
                        Ok(Some(candidate)) => {
                            self.emitted += 1;
                            return Some(candidate);
                        }
                        Ok(None) => continue,
                        Err(err) => {
                            debug!("skipping decomposition: {}", err);
                            continue;
                        }
                    },
                    None => self.literal = None,
                }
            }

            let chosen = self.next_classes()?;
            self.literal = Some(LiteralPhase::new(chosen, &self.target, &self.config));
        }
    }
}
