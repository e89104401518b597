use classgrind::{
    grind, probe, shortest, Ast, CharSet, ClassKind, Config, Element, Grinder, Interval, Matcher,
    Polarity,
};

fn sources(text: &str, polarity: Polarity) -> Vec<String> {
    grind(text, polarity).map(|c| c.into_source()).collect()
}

#[test]
fn single_literal() {
    let candidates: Vec<_> = grind("a", Polarity::Direct).collect();
    assert_eq!(candidates.len(), 1);
    assert_eq!(
        candidates[0].decomposition().elements(),
        &[Element::Literal(Interval::new(0x61, 0x61).unwrap())]
    );
    assert_eq!(candidates[0].source(), "a");
}

#[test]
fn digits_are_a_class() {
    let all = sources("0123456789", Polarity::Direct);
    assert!(all.contains(&r"\d".to_string()), "{:?}", all);
    assert!(all.contains(&"[0-9]".to_string()), "{:?}", all);

    let best = shortest("9876543210", Polarity::Direct).unwrap();
    assert_eq!(best.source(), r"\d");
    let elements = best.decomposition().elements();
    assert_eq!(elements.len(), 1);
    assert!(matches!(elements[0], Element::Special(c) if c.kind() == ClassKind::Digit));
}

#[test]
fn negated_digits() {
    let all = sources("0123456789", Polarity::Negated);
    assert!(all.contains(&r"\D".to_string()), "{:?}", all);
    assert!(all.contains(&"[^0-9]".to_string()), "{:?}", all);
    assert_eq!(shortest("0123456789", Polarity::Negated).unwrap().source(), r"\D");
}

#[test]
fn dash_and_caret_placement() {
    let all = sources("^a-", Polarity::Direct);
    assert_eq!(all, vec!["[-^a]".to_string()]);

    let set = probe(&all[0]).unwrap();
    assert_eq!(set, CharSet::from_text("-^a"));
}

#[test]
fn negated_candidates_match_the_complement() {
    let target = CharSet::from_text("\t\n -");
    for candidate in Grinder::new().grind(&target, Polarity::Negated) {
        assert_eq!(
            probe(candidate.source()).unwrap(),
            target.invert(),
            "{}",
            candidate.source()
        );
        assert!(!candidate.matches(0x20));
        assert!(candidate.matches(0x41));
    }
}

#[test]
fn exclude_chains_both_polarities() {
    let target = CharSet::from_text("0123456789");
    let grinder = Grinder::with_config(Config::new().limit(Some(8)));
    let all: Vec<_> = grinder.exclude(&target).collect();
    assert!(all.iter().any(|c| c.polarity() == Polarity::Negated));
    assert!(all.iter().any(|c| c.polarity() == Polarity::Direct));
    assert!(all.iter().any(|c| c.source() == r"\D"));
    for candidate in &all {
        assert_eq!(probe(candidate.source()).unwrap(), target.invert(), "{}", candidate.source());
    }
}

#[test]
fn line_terminators_survive_the_round_trip() {
    let target = CharSet::from_text("\n\r\u{2028}\u{2029}");
    for candidate in Grinder::new().grind(&target, Polarity::Direct) {
        let source = candidate.source();
        assert!(!source.contains('\u{2028}'), "{:?}", source);
        assert_eq!(probe(source).unwrap(), target, "{}", source);
        assert_eq!(Ast::parse(source).unwrap().to_char_set(), target, "{}", source);
    }
}

#[test]
fn surrogates_are_escaped() {
    let target = CharSet::from_code_points([0xD800, 0xD801, 0xD802, 0xDFFF]).unwrap();
    let all: Vec<_> = Grinder::new().grind(&target, Polarity::Direct).collect();
    assert!(!all.is_empty());
    for candidate in all {
        assert!(candidate.source().is_ascii(), "{:?}", candidate.source());
        assert_eq!(probe(candidate.source()).unwrap(), target);
    }
}

#[test]
fn unescaped_slash_on_request() {
    let grinder = Grinder::with_config(Config::new().escape_slash(false));
    let all: Vec<_> = grinder
        .grind_str("/", Polarity::Direct)
        .map(|c| c.into_source())
        .collect();
    assert_eq!(all, vec!["/".to_string()]);

    assert_eq!(sources("/", Polarity::Direct), vec![r"\/".to_string()]);
}

#[test]
fn limit_caps_the_search() {
    let grinder = Grinder::with_config(Config::new().limit(Some(2)));
    assert_eq!(grinder.grind(&CharSet::full(), Polarity::Direct).count(), 2);
}

#[test]
fn matcher_agrees_with_the_ast() {
    for code in [r"[^\s\d]", r"\w|-", r"[--\/]|\.", r"[\0-\x1F]", r"\S"] {
        let matcher = Matcher::compile(code).unwrap();
        let expected = Ast::parse(code).unwrap().to_char_set();
        assert_eq!(matcher.probe(), expected, "{}", code);
    }
}
