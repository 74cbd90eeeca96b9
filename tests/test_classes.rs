include!("macros.rs");

#[test]
fn test_single_runes_merge_into_classes() {
    assert_join!(&["a", "b"], "[ab]");
    assert_join!(&["b", "a"], "[ab]");
    assert_join!(&["a", "b", "c"], "[a-c]");
    assert_join!(&["a", "c", "e"], "[ace]");
}

#[test]
fn test_literals_widen_classes() {
    assert_join!(&["[a-c]", "d"], "[a-d]");
    assert_join!(&["d", "[a-c]"], "[a-d]");
    assert_join!(&["[a-c]?", "d"], "[a-d]?");
}

#[test]
fn test_classes_pool_in_the_final_alternation() {
    assert_join!(&["[ab]", "[xy]"], "[abxy]");
    assert_join!(&["[a-c]", "[b-e]"], "[a-e]");
    assert_join!(&["[ab]", "z*", "[xy]"], "[abxy]|z*");
}

#[test]
fn test_class_splits_to_extend_a_literal() {
    assert_join!(&["[acd]", "ab"], "ab?|[cd]");
}

#[test]
fn test_quantified_class_absorbs_runes() {
    assert_join!(&["[a-c]*", ""], "[a-c]*");
}

#[test]
fn test_shorthand_classes_desugar() {
    assert_join!(&[r"\d"], "[0-9]");
    assert_join!(&[r"\w"], "[0-9A-Z_a-z]");
    assert_join!(&[r"\d", "a"], "[0-9a]");
}

#[test]
fn test_negated_classes_by_language() {
    let patterns = [r"[^ab]"];
    let corpus = ["a", "b", "c", "z", "0", " ", "\n"];
    assert_same_language!(&patterns, &corpus);

    let patterns = [r"[^a-y]", "m"];
    let corpus = ["a", "m", "n", "y", "z", "~"];
    assert_same_language!(&patterns, &corpus);
}

#[test]
fn test_class_metacharacters_round_trip() {
    assert_join!(&[r"[\-\]]", "a"], "[\\-\\]a]");
    let patterns = [r"[a\-z]"];
    let corpus = ["a", "-", "z", "b", "m"];
    assert_same_language!(&patterns, &corpus);
}
