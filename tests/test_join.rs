include!("macros.rs");

#[test]
fn test_single_pattern_is_canonical() {
    assert_join!(&["abc"], "abc");
    assert_join!(&["ab*c"], "ab*c");
    assert_join!(&["(?:abc)"], "abc");
    assert_join!(&["(abc)"], "abc");
    assert_join!(&["a{2,3}"], "a{2,3}");
    assert_join!(&["a.c"], "a.c");
}

#[test]
fn test_unrelated_patterns_keep_order() {
    assert_join!(&["abc", "def", "ghi"], "abc|def|ghi");
    assert_join!(&["ab", "cd"], "ab|cd");
}

#[test]
fn test_empty_inputs() {
    let none: [&str; 0] = [];
    assert_eq!(reunion::join(&none).unwrap(), "");
    assert_join!(&[""], "(?:)");
    assert_join!(&["", ""], "(?:)");
    assert_join!(&["abc", ""], "(?:abc)?");
    assert_join!(&["", "abc"], "(?:abc)?");
}

#[test]
fn test_prefix_factoring() {
    assert_join!(&["abc", "abd"], "ab[cd]");
    assert_join!(&["abcd", "ab"], "ab(?:cd)?");
    assert_join!(
        &["abcd", "abcf", "abc", "abce", "abcgh", "abdc"],
        "ab(?:c(?:[d-f]|gh)?|dc)"
    );
    assert_join!(&["a", "ab", "abc", "abcd"], "a(?:b(?:cd?)?)?");
}

#[test]
fn test_suffix_factoring() {
    assert_join!(
        &["abcdefg", "abcfg", "abefg", "befg", "beefg"],
        "(?:ab(?:c(?:de)?|e)|bee?)fg"
    );
}

#[test]
fn test_single_runes_pool_into_classes() {
    assert_join!(&["0", "4", "3", "5", "1", "2"], "[0-5]");
    assert_join!(
        &["1", "9", "2", "6", "3", "7", "10", "8", "0", "5", "4"],
        "[0-9]|10"
    );
}

#[test]
fn test_quantified_tail_absorption() {
    assert_join!(&["abc(?:def)+", "abcdef", "abc"], "abc(?:def)*");
}

#[test]
fn test_mixed_quantifiers() {
    let patterns = [
        "ab*c", "c+", "bab?c", "a+c", "cbc+", "dbc+", "ab*c", "c*d+", "d+",
    ];
    assert_join!(&patterns, "(?:ab*|bab?|a+)c|(?:[cd]b)?c+|c*d+");

    let corpus = [
        "", "c", "ac", "aac", "abc", "abbc", "bac", "babc", "bc", "cc", "ccc", "cbc", "cbcc",
        "dbc", "dbcc", "cd", "ccd", "cdd", "d", "dd", "cbd", "ab", "ba",
    ];
    assert_same_language!(&patterns, &corpus);
}

#[test]
fn test_duplicate_absorption() {
    let cases: [&[&str]; 5] = [
        &["abc", "def", "ghi"],
        &["abcd", "abcf", "abc", "abce", "abcgh", "abdc"],
        &["a", "ab", "abc", "abcd"],
        &["0", "4", "3", "5", "1", "2"],
        &["1", "9", "2", "6", "3", "7", "10", "8", "0", "5", "4"],
    ];
    for patterns in cases.iter() {
        let once = reunion::join(patterns.iter().copied()).unwrap();
        let doubled: Vec<&str> = patterns.iter().chain(patterns.iter()).copied().collect();
        let twice = reunion::join(&doubled).unwrap();
        assert_eq!(once, twice, "duplicated inputs changed {:?}", patterns);
    }
}

#[test]
fn test_assembly_is_idempotent() {
    let cases: [&[&str]; 6] = [
        &["abc", "def", "ghi"],
        &["abcd", "abcf", "abc", "abce", "abcgh", "abdc"],
        &["a", "ab", "abc", "abcd"],
        &["abcdefg", "abcfg", "abefg", "befg", "beefg"],
        &["abc(?:def)+", "abcdef", "abc"],
        &[
            "ab*c", "c+", "bab?c", "a+c", "cbc+", "dbc+", "ab*c", "c*d+", "d+",
        ],
    ];
    for patterns in cases.iter() {
        let joined = reunion::join(patterns.iter().copied()).unwrap();
        let rejoined = reunion::join(&[joined.as_str()]).unwrap();
        assert_eq!(joined, rejoined, "reassembly changed {:?}", patterns);
    }
}

#[test]
fn test_empty_match_widens_quantifiers() {
    assert_join!(&["a+", ""], "a*");
    assert_join!(&["", "a+"], "a*");
    assert_join!(&["a*", ""], "a*");
    assert_join!(&["", "a?"], "a?");
    assert_join!(&["a?", ""], "a?");
}

#[test]
fn test_shared_heads_factor() {
    assert_join!(&["x*y*z*", "x*"], "x*(?:y*z*)?");
    assert_join!(&["x*", "x*y*z*"], "x*(?:y*z*)?");
}

#[test]
fn test_parse_failure_surfaces_the_pattern() {
    let err = reunion::join(&["abc", "a(", "def"]).unwrap_err();
    match err {
        reunion::Error::Parse { pattern, .. } => assert_eq!(pattern, "a("),
        err => panic!("expected a parse error, got {:?}", err),
    }
    let err = reunion::join(&["*"]).unwrap_err();
    assert!(matches!(err, reunion::Error::Parse { .. }));
}
