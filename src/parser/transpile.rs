//! Lowering to `regex_syntax`.
//!
//! Code points are moved into plane 1 before they are handed over, so lone
//! surrogates become ordinary scalar values. Every literal is written as
//! `\x{...}` and no perl class is used, which keeps the compiled pattern
//! independent of the regex engine's own idea of `\d`, `\s` or `.`.

use regex_syntax::ast as re_ast;

use super::{Ast, ClassItem};
use crate::range::special::get;
use crate::range::{Interval, MAX_CODE_POINT};
use crate::Error;

pub(crate) const PLANE_OFFSET: u32 = 0x10000;

/// The scalar value that stands in for `cp` in a compiled pattern.
pub(crate) fn shift(cp: u32) -> Result<char, Error> {
    if cp > MAX_CODE_POINT {
        return Err(Error::InvalidCodePoint(cp));
    }
    char::from_u32(cp + PLANE_OFFSET).ok_or(Error::InvalidCodePoint(cp))
}

fn dummy_span() -> re_ast::Span {
    re_ast::Span {
        start: re_ast::Position {
            offset: 0,
            line: 0,
            column: 0,
        },
        end: re_ast::Position {
            offset: 0,
            line: 0,
            column: 0,
        },
    }
}

fn group_flag_default() -> re_ast::Flags {
    re_ast::Flags {
        span: dummy_span(),
        items: vec![],
    }
}

fn literal(cp: u32) -> Result<re_ast::Literal, Error> {
    Ok(re_ast::Literal {
        span: dummy_span(),
        kind: re_ast::LiteralKind::HexBrace(re_ast::HexLiteralKind::X),
        c: shift(cp)?,
    })
}

fn set_item(interval: Interval) -> Result<re_ast::ClassSetItem, Error> {
    let (from, to) = (interval.from(), interval.to());
    if from == to {
        return Ok(re_ast::ClassSetItem::Literal(literal(from)?));
    }
    Ok(re_ast::ClassSetItem::Range(re_ast::ClassSetRange {
        span: dummy_span(),
        start: literal(from)?,
        end: literal(to)?,
    }))
}

fn bracketed(negated: bool, items: Vec<re_ast::ClassSetItem>) -> re_ast::Ast {
    re_ast::Ast::class_bracketed(re_ast::ClassBracketed {
        span: dummy_span(),
        negated,
        kind: re_ast::ClassSet::Item(re_ast::ClassSetItem::Union(re_ast::ClassSetUnion {
            span: dummy_span(),
            items,
        })),
    })
}

fn class(intervals: &[Interval], negated: bool) -> Result<re_ast::Ast, Error> {
    let items = intervals
        .iter()
        .map(|i| set_item(*i))
        .collect::<Result<Vec<_>, _>>()?;

    // `[]` and `[^]` have no spelling here; flip against the whole plane
    if items.is_empty() {
        let everything = Interval::new_unchecked(0, MAX_CODE_POINT);
        return Ok(bracketed(!negated, vec![set_item(everything)?]));
    }
    Ok(bracketed(negated, items))
}

fn item_intervals(item: &ClassItem) -> Result<Vec<Interval>, Error> {
    Ok(match *item {
        ClassItem::Char(c) => vec![Interval::point(c)?],
        ClassItem::Range(from, to) => vec![Interval::new(from, to)?],
        ClassItem::Class(kind) => get(kind).subranges().to_vec(),
    })
}

impl Ast {
    pub fn to_regex_ast(&self) -> Result<re_ast::Ast, Error> {
        Ok(match self {
            Self::Char(c) => re_ast::Ast::literal(literal(*c)?),
            Self::Class(kind) => class(get(*kind).subranges(), false)?,
            Self::Bracket { negated, items } => {
                let mut intervals = vec![];
                for item in items {
                    intervals.extend(item_intervals(item)?);
                }
                class(&intervals, *negated)?
            }
            Self::Or(inner) => {
                let alternation = re_ast::Ast::alternation(re_ast::Alternation {
                    span: dummy_span(),
                    asts: inner
                        .iter()
                        .map(Ast::to_regex_ast)
                        .collect::<Result<Vec<_>, _>>()?,
                });

                re_ast::Ast::group(re_ast::Group {
                    span: dummy_span(),
                    kind: re_ast::GroupKind::NonCapturing(group_flag_default()),
                    ast: Box::new(alternation),
                })
            }
        })
    }

    pub fn to_regex(&self) -> Result<String, Error> {
        Ok(self.to_regex_ast()?.to_string())
    }
}
