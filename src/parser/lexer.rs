use crate::range::special::ClassKind;
use crate::range::MAX_CODE_POINT;
use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    Char(u32),
    Class(ClassKind),
    Or,
    LBracket,
    RBracket,
    /// `^` right after `[`.
    Caret,
    /// An unescaped `-` inside a class.
    Dash,
    Error(Error),
}

#[derive(Debug)]
pub struct Token {
    start: usize,
    end: usize,
    pub data: Tok,
}

impl Token {
    fn char(start: usize, c: u32) -> Self {
        Self {
            start,
            end: start,
            data: Tok::Char(c),
        }
    }

    fn class(start: usize, kind: ClassKind) -> Self {
        Self {
            start,
            end: start,
            data: Tok::Class(kind),
        }
    }

    fn error(start: usize, error: Error) -> Self {
        Self {
            start,
            end: start,
            data: Tok::Error(error),
        }
    }

    pub fn get_error(&self) -> Option<Error> {
        if let Tok::Error(err) = &self.data {
            Some(err.clone())
        } else {
            None
        }
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

pub struct Lexer<'a> {
    code: &'a str,
    i: usize,
    in_class: bool,
    class_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            i: 0,
            in_class: false,
            class_start: false,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.code[self.i..].chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Exactly `digits` hex digits.
    fn hex(&mut self, digits: usize) -> Option<u32> {
        let s = self.code.get(self.i..self.i + digits)?;
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(s, 16).ok()?;
        self.i += digits;
        Some(value)
    }

    fn escape(&mut self, start: usize) -> Token {
        let Some(c) = self.bump() else {
            return Token::error(start, Error::DanglingEscape);
        };

        let kind = match c {
            'd' => Some(ClassKind::Digit),
            'D' => Some(ClassKind::NonDigit),
            'w' => Some(ClassKind::Word),
            'W' => Some(ClassKind::NonWord),
            's' => Some(ClassKind::Space),
            'S' => Some(ClassKind::NonSpace),
            _ => None,
        };
        if let Some(kind) = kind {
            return Token::class(start, kind);
        }

        let cp = match c {
            'n' => 0x0A,
            'r' => 0x0D,
            't' => 0x09,
            'v' => 0x0B,
            'f' => 0x0C,
            '0' if !self.code[self.i..].starts_with(|d: char| d.is_ascii_digit()) => 0x00,
            'x' => match self.hex(2) {
                Some(cp) => cp,
                None => return Token::error(start, Error::UnnecessaryEscape(start)),
            },
            'u' => match self.hex(4) {
                Some(cp) => cp,
                None => return Token::error(start, Error::UnnecessaryEscape(start)),
            },
            c if c.is_ascii_punctuation() => c as u32,
            _ => return Token::error(start, Error::UnnecessaryEscape(start)),
        };
        Token::char(start, cp)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let mut tok = self.lex()?;
        tok.end = self.i;
        Some(tok)
    }
}

impl<'a> Lexer<'a> {
    fn lex(&mut self) -> Option<Token> {
        let start = self.i;
        let c = self.bump()?;
        let class_start = std::mem::replace(&mut self.class_start, false);

        if c == '\\' {
            return Some(self.escape(start));
        }
        if c as u32 > MAX_CODE_POINT {
            return Some(Token::error(start, Error::InvalidCodePoint(c as u32)));
        }

        let data = if self.in_class {
            match c {
                ']' => {
                    self.in_class = false;
                    Tok::RBracket
                }
                '^' if class_start => Tok::Caret,
                '-' => Tok::Dash,
                _ => Tok::Char(c as u32),
            }
        } else {
            match c {
                '|' => Tok::Or,
                '[' => {
                    self.in_class = true;
                    self.class_start = true;
                    Tok::LBracket
                }
                '.' => Tok::Class(ClassKind::Dot),
                // quantifiers, groups and anchors are not part of a fragment
                '$' | '(' | ')' | '*' | '+' | '?' | '^' | '{' | '}' => {
                    Tok::Error(Error::ParseError(start))
                }
                _ => Tok::Char(c as u32),
            }
        };

        Some(Token {
            start,
            end: start,
            data,
        })
    }
}
