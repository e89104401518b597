/// Characters that always need a backslash outside of a class.
fn is_alternation_meta(c: char) -> bool {
    matches!(
        c,
        '$' | '(' | ')' | '*' | '+' | '.' | '?' | '[' | '\\' | '^' | '{' | '|' | '}'
    )
}

/// Escapes shared by both contexts: line terminators and lone surrogates.
/// Returns `false` when `cp` needs no such escape.
fn push_common(out: &mut String, cp: u32) -> bool {
    match cp {
        0x0A => out.push_str(r"\n"),
        0x0D => out.push_str(r"\r"),
        0x2028 | 0x2029 | 0xD800..=0xDFFF => out.push_str(&format!(r"\u{:04X}", cp)),
        _ => return false,
    }
    true
}

/// Whether `cp` needs a backslash in some JavaScript string, template
/// literal or pattern context.
pub fn may_be_escaped(cp: u32) -> bool {
    match cp {
        0x0A | 0x0D | 0x2028 | 0x2029 => true,
        _ => char::from_u32(cp)
            .map_or(false, |c| is_alternation_meta(c) || matches!(c, '`' | '/' | ']')),
    }
}

/// Append `cp` as it has to be written inside `[...]`.
pub fn push_class_char(out: &mut String, cp: u32, escape_slash: bool) {
    if push_common(out, cp) {
        return;
    }
    // surrogates were handled above, so this is always a char
    let Some(c) = char::from_u32(cp) else {
        return;
    };
    if c == ']' || c == '\\' || (escape_slash && c == '/') {
        out.push('\\');
    }
    out.push(c);
}

/// Append `cp` as it has to be written as a bare alternative.
pub fn push_alternation_char(out: &mut String, cp: u32, escape_slash: bool) {
    if push_common(out, cp) {
        return;
    }
    let Some(c) = char::from_u32(cp) else {
        return;
    };
    if is_alternation_meta(c) || (escape_slash && c == '/') {
        out.push('\\');
    }
    out.push(c);
}

/// Byte length of `cp` written inside a class.
pub fn class_char_len(cp: u32, escape_slash: bool) -> usize {
    match cp {
        0x0A | 0x0D => 2,
        0x2028 | 0x2029 | 0xD800..=0xDFFF => 6,
        0x2F if escape_slash => 2,
        0x5C | 0x5D => 2,
        _ => utf8_width(cp),
    }
}

/// Bytes `cp` takes in UTF-8, unescaped.
pub fn utf8_width(cp: u32) -> usize {
    if cp < 0x80 {
        1
    } else if cp < 0x800 {
        2
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::{class_char_len, may_be_escaped, push_alternation_char, push_class_char};

    fn class(cp: u32) -> String {
        let mut s = String::new();
        push_class_char(&mut s, cp, true);
        s
    }

    fn alt(cp: u32) -> String {
        let mut s = String::new();
        push_alternation_char(&mut s, cp, true);
        s
    }

    #[test]
    fn class_escapes() {
        assert_eq!(class(0x5D), r"\]");
        assert_eq!(class(0x5C), r"\\");
        assert_eq!(class(0x2F), r"\/");
        assert_eq!(class(0x0A), r"\n");
        assert_eq!(class(0x2029), r"\u2029");
        assert_eq!(class(0xDC00), r"\uDC00");
        assert_eq!(class(0x5E), "^");
        assert_eq!(class(0x2E), ".");
        assert_eq!(class(0xE9), "é");
    }

    #[test]
    fn alternation_escapes() {
        assert_eq!(alt(0x2E), r"\.");
        assert_eq!(alt(0x7C), r"\|");
        assert_eq!(alt(0x5E), r"\^");
        assert_eq!(alt(0x5D), "]");
        assert_eq!(alt(0x2D), "-");
        assert_eq!(alt(0x0D), r"\r");
    }

    #[test]
    fn escapable_anywhere() {
        let escapable: Vec<u32> = (0..0x80).filter(|&cp| may_be_escaped(cp)).collect();
        let expected: Vec<u32> = "\n\r$()*+./?[\\]^`{|}".chars().map(|c| c as u32).collect();
        assert_eq!(escapable, expected);
        assert!(may_be_escaped(0x2028));
        assert!(may_be_escaped(0x2029));
        assert!(!may_be_escaped(0x2D));
        assert!(!may_be_escaped(0xE9));
    }

    #[test]
    fn lengths_agree_with_rendering() {
        for cp in (0..=0xFFFF).step_by(7).chain([0x0A, 0x0D, 0x2F, 0x5C, 0x5D, 0x2028]) {
            assert_eq!(class_char_len(cp, true), class(cp).len(), "U+{:04X}", cp);
        }
        let mut s = String::new();
        push_class_char(&mut s, 0x2F, false);
        assert_eq!(s, "/");
        assert_eq!(class_char_len(0x2F, false), 1);
    }
}
