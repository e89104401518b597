use log::debug;
use regex_automata::dfa::{dense, Automaton, StartKind};
use regex_automata::util::primitives::StateID;
use regex_automata::util::start::Config as StartConfig;
use regex_automata::Anchored;

use crate::parser::shift;
use crate::range::{CharSet, Interval, MAX_CODE_POINT};
use crate::{Ast, Error};

/// A compiled fragment that answers "does it match this one code point".
///
/// The automaton is built from the fragment's own AST, so it checks the
/// fragment the way a pattern engine would read it rather than how the
/// grinder meant it.
#[derive(Debug)]
pub struct Matcher {
    dfa: dense::DFA<Vec<u32>>,
    start: StateID,
}

impl Matcher {
    pub fn new(ast: &Ast) -> Result<Self, Error> {
        let pattern = ast.to_regex()?;
        debug!("compiling {}", pattern);

        let build_cfg = dense::Config::new().start_kind(StartKind::Anchored);

        let dfa = dense::Builder::new()
            .configure(build_cfg)
            .build(&pattern)
            .map_err(|err| Error::Compile(err.to_string()))?;

        let start = dfa
            .start_state(&StartConfig::new().anchored(Anchored::Yes))
            .map_err(|err| Error::Compile(err.to_string()))?;

        Ok(Self { dfa, start })
    }

    pub fn compile(code: &str) -> Result<Self, Error> {
        Self::new(&Ast::parse(code)?)
    }

    pub fn is_match(&self, cp: u32) -> bool {
        let Ok(c) = shift(cp) else {
            return false;
        };
        let mut buf = [0; 4];

        let mut state = self.start;
        for &b in c.encode_utf8(&mut buf).as_bytes() {
            state = self.dfa.next_state(state, b);
            if self.dfa.is_special_state(state) && self.dfa.is_dead_state(state) {
                return false;
            }
        }

        state = self.dfa.next_eoi_state(state);
        self.dfa.is_match_state(state)
    }

    /// Every code point the fragment matches.
    pub fn probe(&self) -> CharSet {
        let mut ranges = vec![];
        let mut open = None;

        for cp in 0..=MAX_CODE_POINT {
            match (self.is_match(cp), open) {
                (true, None) => open = Some(cp),
                (false, Some(from)) => {
                    ranges.push(Interval::new_unchecked(from, cp - 1));
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(from) = open {
            ranges.push(Interval::new_unchecked(from, MAX_CODE_POINT));
        }

        CharSet::new(ranges)
    }
}

/// Parse, compile and probe a fragment.
pub fn probe(code: &str) -> Result<CharSet, Error> {
    Ok(Matcher::compile(code)?.probe())
}
