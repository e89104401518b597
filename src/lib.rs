//! Exhaustive search for short regular expression character classes.
//!
//! Given the characters a class should match, [`Grinder`] enumerates every
//! irredundant way to cover them with literal ranges and the built-in
//! classes (`\w`, `\d`, `\s`, their inverses and `.`), and renders each one
//! as the shortest fragment it can find:
//!
//! ```
//! use classgrind::{shortest, Polarity};
//!
//! let best = shortest("0123456789_", Polarity::Direct).unwrap();
//! assert_eq!(best.source(), r"\d|_");
//! ```
//!
//! Fragments can be checked back with [`probe`], which compiles them into a
//! DFA and collects every code point they accept.

mod error;
mod grind;
mod parser;
mod range;
mod search;
mod serialize;

pub use error::Error;
pub use grind::{Candidate, Config, Decomposition, Grind, Grinder, Polarity, Ugliness};
pub use parser::{Ast, ClassItem};
pub use range::{algebra, special, CharSet, ClassKind, Element, Interval, SpecialClass};
pub use search::{probe, Matcher};

/// All candidates for the code units of `text`, with the default [`Config`].
pub fn grind(text: &str, polarity: Polarity) -> Grind {
    Grinder::new().grind_str(text, polarity)
}

/// The candidate with the shortest source. Among equally short ones the
/// first found wins.
pub fn shortest(text: &str, polarity: Polarity) -> Option<Candidate> {
    grind(text, polarity).fold(None, |best: Option<Candidate>, candidate| match best {
        Some(best) if best.source().len() <= candidate.source().len() => Some(best),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod test {
    use super::{grind, probe, shortest, CharSet, Polarity};

    #[test]
    fn readme_shortest() {
        let best = shortest("0123456789_", Polarity::Direct).unwrap();
        assert_eq!(best.source(), r"\d|_");
    }

    #[test]
    fn readme_probe() {
        let set = probe(r"[\d_]").unwrap();
        assert_eq!(set, CharSet::from_text("0123456789_"));
    }

    #[test]
    fn empty_text_has_no_candidates() {
        assert_eq!(grind("", Polarity::Direct).count(), 0);
        assert!(shortest("", Polarity::Negated).is_none());
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<super::Grinder>();
        assert_send_sync::<super::Grind>();
        assert_send_sync::<super::Candidate>();
        assert_send_sync::<super::Matcher>();
    }

    #[test]
    fn every_candidate_round_trips() {
        for candidate in grind("abc-xyz_", Polarity::Direct) {
            assert_eq!(
                probe(candidate.source()).unwrap(),
                CharSet::from_text("abc-xyz_"),
                "{}",
                candidate.source()
            );
        }
    }
}
