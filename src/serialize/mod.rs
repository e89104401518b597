//! Rendering a decomposition as pattern source.
//!
//! Two forms are built, a bracket expression (`[a-z\d]`, `[^...]`) and an
//! alternation (`a|b|\d`), and the shorter one in UTF-8 bytes wins. Ties go
//! to the bracket.

pub mod escape;

use crate::grind::{Config, Polarity};
use crate::range::algebra::canonicalize;
use crate::range::{Element, Interval, SpecialClass};
use crate::Error;

use escape::{push_alternation_char, push_class_char};

const DASH: u32 = 0x2D;
const CARET: u32 = 0x5E;

/// Alternations only pay off for runs this short.
const MAX_ALTERNATION_RUN: u32 = 3;

/// The shortest fragment for `elements` under `polarity`.
pub fn serialize(
    elements: &[Element],
    polarity: Polarity,
    config: &Config,
) -> Result<String, Error> {
    let negated = polarity == Polarity::Negated;
    let mut best = bracket(elements, negated, config)?;

    let alternative = match (polarity, elements) {
        // [^\d] is \D, and [^.] is the line terminators
        (Polarity::Negated, [Element::Special(class)]) => {
            Some(alternation(&[Element::Special(class.inverse())], config))
        }
        (Polarity::Negated, _) => None,
        (Polarity::Direct, _) => elements
            .iter()
            .all(|e| match e {
                Element::Literal(interval) => interval.len() <= MAX_ALTERNATION_RUN,
                Element::Special(_) => true,
            })
            .then(|| alternation(elements, config)),
    };

    if let Some(alternative) = alternative {
        if alternative.len() < best.len() {
            best = alternative;
        }
    }
    Ok(best)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Piece {
    Name(&'static str),
    Run(Interval),
}

/// Bracket form. Under direct polarity a `.` cannot go inside the class
/// and is appended as `|.` instead.
pub fn bracket(elements: &[Element], negated: bool, config: &Config) -> Result<String, Error> {
    let mut names = vec![];
    let mut literals = vec![];
    let mut trailing: Vec<&'static SpecialClass> = vec![];

    for element in elements {
        match element {
            Element::Literal(interval) => literals.push(*interval),
            Element::Special(class) if !class.not_bracketable() => names.push(class.name()),
            Element::Special(class) if class.name().is_empty() => {
                literals.extend_from_slice(class.subranges())
            }
            Element::Special(class) if negated => {
                if !config.get_expand_unbracketable() {
                    return Err(Error::Unsupported);
                }
                literals.extend_from_slice(class.subranges());
            }
            Element::Special(class) => trailing.push(class),
        }
    }

    let pieces = arrange(names, canonicalize(literals), negated);

    let mut res = String::new();
    if !pieces.is_empty() || negated {
        res.push('[');
        if negated {
            res.push('^');
        }
        for (i, piece) in pieces.iter().enumerate() {
            match piece {
                Piece::Name(name) => res.push_str(name),
                Piece::Run(run) => {
                    // a lone caret that could not be moved away from the front
                    if i == 0 && !negated && run.from() == CARET {
                        res.push('\\');
                    }
                    push_run(&mut res, *run, config);
                }
            }
        }
        res.push(']');
    }

    for class in trailing {
        if !res.is_empty() {
            res.push('|');
        }
        res.push_str(class.name());
    }

    Ok(res)
}

/// Order the class body so that no `-` reads as a range operator and no
/// `^` reads as a negation.
fn arrange(names: Vec<&'static str>, literals: Vec<Interval>, negated: bool) -> Vec<Piece> {
    let mut runs = Vec::with_capacity(literals.len() + 1);
    for run in literals {
        // "a-" next to another atom would turn into a range, write it apart
        if run.len() == 2 && (run.from() == DASH || run.to() == DASH) {
            runs.push(Interval::new_unchecked(run.from(), run.from()));
            runs.push(Interval::new_unchecked(run.to(), run.to()));
        } else {
            runs.push(run);
        }
    }

    let mut pieces = Vec::with_capacity(names.len() + runs.len());
    if let Some(i) = runs.iter().position(|r| r.from() == DASH) {
        pieces.push(Piece::Run(runs.remove(i)));
    }
    pieces.extend(names.into_iter().map(Piece::Name));
    pieces.extend(runs.into_iter().map(Piece::Run));

    if !negated && pieces.len() > 1 {
        if let Some(Piece::Run(first)) = pieces.first() {
            if first.from() == CARET {
                pieces.rotate_left(1);
            }
        }
    }

    pieces
}

fn push_run(out: &mut String, run: Interval, config: &Config) {
    let escape_slash = config.get_escape_slash();
    push_class_char(out, run.from(), escape_slash);
    match run.len() {
        1 => {}
        2 => push_class_char(out, run.to(), escape_slash),
        _ => {
            out.push('-');
            push_class_char(out, run.to(), escape_slash);
        }
    }
}

/// Alternation form: every code point and every class on its own.
pub fn alternation(elements: &[Element], config: &Config) -> String {
    let escape_slash = config.get_escape_slash();
    let mut res = String::new();

    let push_point = |res: &mut String, cp: u32| {
        if !res.is_empty() {
            res.push('|');
        }
        push_alternation_char(res, cp, escape_slash);
    };

    for element in elements {
        match element {
            Element::Special(class) if !class.name().is_empty() => {
                if !res.is_empty() {
                    res.push('|');
                }
                res.push_str(class.name());
            }
            _ => {
                for run in element.subranges() {
                    for cp in run.from()..=run.to() {
                        push_point(&mut res, cp);
                    }
                }
            }
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::{alternation, bracket, serialize};
    use crate::grind::{Config, Polarity};
    use crate::range::special::{get, ClassKind};
    use crate::range::{Element, Interval};
    use crate::Error;

    fn lit(from: u32, to: u32) -> Element {
        Element::Literal(Interval::new(from, to).unwrap())
    }

    fn class(kind: ClassKind) -> Element {
        Element::Special(get(kind))
    }

    fn direct(elements: &[Element]) -> String {
        serialize(elements, Polarity::Direct, &Config::new()).unwrap()
    }

    fn negated(elements: &[Element]) -> String {
        serialize(elements, Polarity::Negated, &Config::new()).unwrap()
    }

    #[test]
    fn single_char_prefers_alternation() {
        assert_eq!(direct(&[lit(0x61, 0x61)]), "a");
        assert_eq!(direct(&[lit(0x2E, 0x2E)]), r"\.");
        assert_eq!(negated(&[lit(0x61, 0x61)]), "[^a]");
    }

    #[test]
    fn digit_class() {
        assert_eq!(direct(&[class(ClassKind::Digit)]), r"\d");
        assert_eq!(negated(&[class(ClassKind::Digit)]), r"\D");
        assert_eq!(negated(&[class(ClassKind::NonSpace)]), r"\s");
    }

    #[test]
    fn runs_by_length() {
        assert_eq!(direct(&[lit(0x61, 0x62), lit(0x30, 0x39)]), "[0-9ab]");
        assert_eq!(direct(&[lit(0x61, 0x63), lit(0x78, 0x78)]), "[a-cx]");
        assert_eq!(direct(&[lit(0x61, 0x62)]), "a|b");
    }

    #[test]
    fn alternation_wins_when_shorter() {
        assert_eq!(direct(&[class(ClassKind::Digit), lit(0x78, 0x78)]), r"\d|x");
        assert_eq!(direct(&[class(ClassKind::Digit), class(ClassKind::Space)]), r"\d|\s");
        assert_eq!(direct(&[class(ClassKind::Digit), lit(0x61, 0x63)]), r"[\da-c]");
        assert_eq!(
            alternation(&[class(ClassKind::Digit), lit(0x61, 0x62)], &Config::new()),
            r"\d|a|b"
        );
    }

    #[test]
    fn dash_goes_first() {
        assert_eq!(
            bracket(&[lit(0x2D, 0x2D), lit(0x5E, 0x5E), lit(0x61, 0x61)], false, &Config::new())
                .unwrap(),
            "[-^a]"
        );
        assert_eq!(
            bracket(&[lit(0x61, 0x61), lit(0x2C, 0x2D)], false, &Config::new()).unwrap(),
            "[-,a]"
        );
        assert_eq!(
            bracket(&[class(ClassKind::Word), lit(0x2D, 0x2F)], true, &Config::new()).unwrap(),
            r"[^--\/\w]"
        );
        // a dash inside a range needs nothing
        assert_eq!(
            bracket(&[lit(0x20, 0x20), lit(0x2B, 0x2F)], false, &Config::new()).unwrap(),
            r"[ +-\/]"
        );
    }

    #[test]
    fn caret_never_leads() {
        let config = Config::new();
        assert_eq!(bracket(&[lit(0x5E, 0x5F), lit(0x7E, 0x7E)], false, &config).unwrap(), "[~^_]");
        assert_eq!(bracket(&[lit(0x5E, 0x5E)], false, &config).unwrap(), r"[\^]");
        assert_eq!(bracket(&[lit(0x5E, 0x5E)], true, &config).unwrap(), "[^^]");
        assert_eq!(direct(&[lit(0x5E, 0x5E)]), r"\^");
    }

    #[test]
    fn dot_direct_is_an_alternative() {
        let dot = class(ClassKind::Dot);
        assert_eq!(direct(&[dot]), ".");
        assert_eq!(
            bracket(&[lit(0x21, 0x22), dot], false, &Config::new()).unwrap(),
            "[!\"]|."
        );
        assert_eq!(direct(&[lit(0x21, 0x22), dot]), "!|\"|.");
        // a tie keeps the bracket
        assert_eq!(direct(&[lit(0x21, 0x23), dot]), "[!-#]|.");
        assert_eq!(direct(&[lit(0x21, 0x24), dot]), "[!-$]|.");
    }

    #[test]
    fn dot_negated_is_expanded() {
        let dot = class(ClassKind::Dot);
        assert_eq!(negated(&[dot]), r"\n|\r|\u2028|\u2029");
        let s = negated(&[dot, lit(0x0A, 0x0A)]);
        assert!(s.starts_with("[^"), "{}", s);
        assert!(!s.contains('.'), "{}", s);
        assert_eq!(
            serialize(
                &[dot, lit(0x0A, 0x0A)],
                Polarity::Negated,
                &Config::new().expand_unbracketable(false)
            ),
            Err(Error::Unsupported)
        );
    }

    #[test]
    fn line_terminators_are_always_literal() {
        let lt = class(ClassKind::LineTerminator);
        assert_eq!(direct(&[lt]), r"[\n\r\u2028\u2029]");
        assert_eq!(negated(&[lt]), ".");
    }

    #[test]
    fn escapes_inside_classes() {
        assert_eq!(direct(&[lit(0x5B, 0x5D)]), r"[[-\]]");
        assert_eq!(
            direct(&[lit(0x2F, 0x2F), lit(0x5C, 0x5D), lit(0x61, 0x64)]),
            r"[\/\\\]a-d]"
        );
        assert_eq!(
            serialize(
                &[lit(0x2F, 0x2F), lit(0x41, 0x41)],
                Polarity::Direct,
                &Config::new().escape_slash(false)
            )
            .unwrap(),
            "/|A"
        );
        assert_eq!(direct(&[lit(0xD800, 0xDFFF)]), r"[\uD800-\uDFFF]");
    }

    #[test]
    fn overlapping_literals_are_merged() {
        assert_eq!(direct(&[lit(0x61, 0x63), lit(0x63, 0x66)]), "[a-f]");
        assert_eq!(direct(&[lit(0x61, 0x62), lit(0x63, 0x63)]), "[a-c]");
    }
}
