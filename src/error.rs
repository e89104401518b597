use std::fmt;

/// Everything that can go wrong while building sets, serializing
/// decompositions or checking fragments.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// An interval with `from > to`, or a bound above `0xFFFF`.
    InvalidRange { from: u32, to: u32 },
    /// A code point outside `0..=0xFFFF`.
    InvalidCodePoint(u32),
    /// A `.` was asked to appear inside a negated class while expansion of
    /// unbracketable classes is turned off.
    Unsupported,
    /// The fragment could not be parsed at the given byte offset.
    ParseError(usize),
    /// The fragment ends with a lone backslash.
    DanglingEscape,
    /// The fragment escapes a character that has no escape meaning.
    UnnecessaryEscape(usize),
    /// The fragment parsed, but the automaton for it could not be built.
    Compile(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRange { from, to } => {
                write!(f, "invalid range U+{:04X}-U+{:04X}", from, to)
            }
            Error::InvalidCodePoint(cp) => write!(f, "code point U+{:04X} is out of range", cp),
            Error::Unsupported => {
                write!(f, "'.' cannot be negated inside a class without expanding it")
            }
            Error::ParseError(pos) => write!(f, "unexpected input at offset {}", pos),
            Error::DanglingEscape => write!(f, "pattern ends with a dangling escape"),
            Error::UnnecessaryEscape(pos) => write!(f, "unknown escape at offset {}", pos),
            Error::Compile(msg) => write!(f, "failed to compile fragment: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
