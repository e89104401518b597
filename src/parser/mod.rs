//! Parsing of single-character pattern fragments.
//!
//! A fragment is a `|`-separated list of characters, escapes, `.` and
//! bracket classes, the same shapes the serializer writes. Anything that
//! could match more or less than one character is rejected.

mod ast;
mod lexer;
mod transpile;

use lalrpop_util::ParseError;

pub use ast::{Ast, ClassItem};
pub(crate) use transpile::shift;

use crate::Error;

lalrpop_util::lalrpop_mod!(
    #[allow(clippy::ptr_arg)]
    #[rustfmt::skip]
    pub grammar,
    "/parser/grammar.rs"
);

impl Error {
    fn from_lalrpop(err: ParseError<usize, lexer::Tok, Error>) -> Self {
        match err {
            ParseError::User { error } => error,
            ParseError::InvalidToken { location } => Error::ParseError(location),
            ParseError::UnrecognizedEof { location, .. } => Error::ParseError(location),
            ParseError::UnrecognizedToken {
                token: (start, _, _),
                ..
            } => Error::ParseError(start),
            ParseError::ExtraToken {
                token: (start, _, _),
            } => Error::ParseError(start),
        }
    }
}

pub fn parse(code: &str) -> Result<Ast, Error> {
    let tokens = lexer::Lexer::new(code).map(|tok| {
        if let Some(err) = tok.get_error() {
            Err(err)
        } else {
            let (start, end) = tok.bounds();
            Ok((start, tok.data, end))
        }
    });

    grammar::FragmentParser::new()
        .parse(tokens)
        .map_err(Error::from_lalrpop)
}
