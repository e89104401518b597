//! The built-in character classes and their exact complements.
//!
//! All tables are constant data; nothing here is mutated after compilation.

use super::Interval;

const fn r(from: u32, to: u32) -> Interval {
    Interval::new_unchecked(from, to)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Word,
    NonWord,
    Digit,
    NonDigit,
    Space,
    NonSpace,
    Dot,
    LineTerminator,
}

impl ClassKind {
    pub fn inverse(self) -> ClassKind {
        match self {
            ClassKind::Word => ClassKind::NonWord,
            ClassKind::NonWord => ClassKind::Word,
            ClassKind::Digit => ClassKind::NonDigit,
            ClassKind::NonDigit => ClassKind::Digit,
            ClassKind::Space => ClassKind::NonSpace,
            ClassKind::NonSpace => ClassKind::Space,
            ClassKind::Dot => ClassKind::LineTerminator,
            ClassKind::LineTerminator => ClassKind::Dot,
        }
    }
}

/// A named class with a fixed denotation.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SpecialClass {
    kind: ClassKind,
    name: &'static str,
    subranges: &'static [Interval],
    not_bracketable: bool,
}

impl SpecialClass {
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// The short form, e.g. `\d`. Empty for classes that have none.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Sorted, disjoint intervals whose union is the class.
    pub fn subranges(&self) -> &'static [Interval] {
        self.subranges
    }

    /// Whether the class cannot be written by name inside a bracket.
    pub fn not_bracketable(&self) -> bool {
        self.not_bracketable
    }

    pub fn inverse(&self) -> &'static SpecialClass {
        get(self.kind.inverse())
    }

    /// Number of code points in the class.
    pub fn size(&self) -> u32 {
        self.subranges.iter().map(Interval::len).sum()
    }
}

static WORD: SpecialClass = SpecialClass {
    kind: ClassKind::Word,
    name: r"\w",
    subranges: &[r(0x30, 0x39), r(0x41, 0x5A), r(0x5F, 0x5F), r(0x61, 0x7A)],
    not_bracketable: false,
};

static NON_WORD: SpecialClass = SpecialClass {
    kind: ClassKind::NonWord,
    name: r"\W",
    subranges: &[
        r(0x00, 0x2F),
        r(0x3A, 0x40),
        r(0x5B, 0x5E),
        r(0x60, 0x60),
        r(0x7B, 0xFFFF),
    ],
    not_bracketable: false,
};

static DIGIT: SpecialClass = SpecialClass {
    kind: ClassKind::Digit,
    name: r"\d",
    subranges: &[r(0x30, 0x39)],
    not_bracketable: false,
};

static NON_DIGIT: SpecialClass = SpecialClass {
    kind: ClassKind::NonDigit,
    name: r"\D",
    subranges: &[r(0x00, 0x2F), r(0x3A, 0xFFFF)],
    not_bracketable: false,
};

// White_Space plus BOM. U+180E stopped being a space separator in
// Unicode 6.3 and current engines no longer match it.
static SPACE: SpecialClass = SpecialClass {
    kind: ClassKind::Space,
    name: r"\s",
    subranges: &[
        r(0x09, 0x0D),
        r(0x20, 0x20),
        r(0xA0, 0xA0),
        r(0x1680, 0x1680),
        r(0x2000, 0x200A),
        r(0x2028, 0x2029),
        r(0x202F, 0x202F),
        r(0x205F, 0x205F),
        r(0x3000, 0x3000),
        r(0xFEFF, 0xFEFF),
    ],
    not_bracketable: false,
};

static NON_SPACE: SpecialClass = SpecialClass {
    kind: ClassKind::NonSpace,
    name: r"\S",
    subranges: &[
        r(0x00, 0x08),
        r(0x0E, 0x1F),
        r(0x21, 0x9F),
        r(0xA1, 0x167F),
        r(0x1681, 0x1FFF),
        r(0x200B, 0x2027),
        r(0x202A, 0x202E),
        r(0x2030, 0x205E),
        r(0x2060, 0x2FFF),
        r(0x3001, 0xFEFE),
        r(0xFF00, 0xFFFF),
    ],
    not_bracketable: false,
};

static DOT: SpecialClass = SpecialClass {
    kind: ClassKind::Dot,
    name: ".",
    subranges: &[
        r(0x00, 0x09),
        r(0x0B, 0x0C),
        r(0x0E, 0x2027),
        r(0x202A, 0xFFFF),
    ],
    not_bracketable: true,
};

// Not a real class: the exact complement of `.`, which has no short form.
static LINE_TERMINATOR: SpecialClass = SpecialClass {
    kind: ClassKind::LineTerminator,
    name: "",
    subranges: &[r(0x0A, 0x0A), r(0x0D, 0x0D), r(0x2028, 0x2029)],
    not_bracketable: true,
};

static REGISTERED: [&SpecialClass; 7] = [
    &WORD, &NON_WORD, &DIGIT, &NON_DIGIT, &SPACE, &NON_SPACE, &DOT,
];

/// The classes the search may pick from, in registration order.
pub fn all() -> &'static [&'static SpecialClass] {
    &REGISTERED
}

pub fn get(kind: ClassKind) -> &'static SpecialClass {
    match kind {
        ClassKind::Word => &WORD,
        ClassKind::NonWord => &NON_WORD,
        ClassKind::Digit => &DIGIT,
        ClassKind::NonDigit => &NON_DIGIT,
        ClassKind::Space => &SPACE,
        ClassKind::NonSpace => &NON_SPACE,
        ClassKind::Dot => &DOT,
        ClassKind::LineTerminator => &LINE_TERMINATOR,
    }
}

/// The class whose inverse is `class`.
pub fn by_inverse(class: &SpecialClass) -> &'static SpecialClass {
    get(class.kind.inverse())
}

/// Look a class up by its short form.
pub fn by_name(name: &str) -> Option<&'static SpecialClass> {
    REGISTERED.iter().copied().find(|c| c.name == name)
}
