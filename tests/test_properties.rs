use proptest::prelude::*;

include!("macros.rs");

/// Every string over {a, b} up to length four.
fn corpus() -> Vec<String> {
    let mut all = vec![String::new()];
    let mut layer = vec![String::new()];
    for _ in 0..4 {
        let mut next = Vec::new();
        for s in &layer {
            for c in ['a', 'b'].iter() {
                let mut t = s.clone();
                t.push(*c);
                next.push(t);
            }
        }
        all.extend(next.iter().cloned());
        layer = next;
    }
    all
}

proptest! {
    /// The assembled pattern accepts exactly the union of the inputs.
    /// Inputs here are plain literals, so the union is the input set.
    #[test]
    fn language_equals_union(patterns in prop::collection::vec("[ab]{0,4}", 1..6)) {
        let joined = reunion::join(&patterns).unwrap();
        let combined = anchored(&joined);
        for s in corpus() {
            let expected = patterns.iter().any(|p| *p == s);
            prop_assert_eq!(
                combined.is_match(&s),
                expected,
                "assembling {:?} into {:?} changed membership of {:?}",
                patterns, joined, s
            );
        }
    }

    /// Input order changes the shape of the output, never its language.
    #[test]
    fn permutation_preserves_language(patterns in prop::collection::vec("[ab]{0,3}", 1..5)) {
        let joined = reunion::join(&patterns).unwrap();
        let mut reversed = patterns.clone();
        reversed.reverse();
        let rejoined = reunion::join(&reversed).unwrap();
        let a = anchored(&joined);
        let b = anchored(&rejoined);
        for s in corpus() {
            prop_assert_eq!(
                a.is_match(&s),
                b.is_match(&s),
                "{:?} and {:?} disagree on {:?}",
                joined, rejoined, s
            );
        }
    }

    /// Feeding every input twice adds nothing.
    #[test]
    fn duplicates_are_absorbed(patterns in prop::collection::vec("[ab]{0,4}", 1..6)) {
        let once = reunion::join(&patterns).unwrap();
        let doubled: Vec<&str> = patterns.iter().chain(patterns.iter()).map(|s| s.as_str()).collect();
        let twice = reunion::join(&doubled).unwrap();
        let a = anchored(&once);
        let b = anchored(&twice);
        for s in corpus() {
            prop_assert_eq!(
                a.is_match(&s),
                b.is_match(&s),
                "{:?} and {:?} disagree on {:?}",
                once, twice, s
            );
        }
    }

    /// Assembling the assembled pattern again changes nothing observable.
    #[test]
    fn reassembly_is_idempotent(patterns in prop::collection::vec("[ab]{0,4}", 1..6)) {
        let joined = reunion::join(&patterns).unwrap();
        let rejoined = reunion::join(&[joined.as_str()]).unwrap();
        let a = anchored(&joined);
        let b = anchored(&rejoined);
        for s in corpus() {
            prop_assert_eq!(
                a.is_match(&s),
                b.is_match(&s),
                "{:?} and {:?} disagree on {:?}",
                joined, rejoined, s
            );
        }
    }

    /// Every emitted tree satisfies the structural invariants, character
    /// classes included.
    #[test]
    fn emitted_trees_are_well_formed(patterns in prop::collection::vec("[a-j]{1,2}", 2..10)) {
        let joined = reunion::join(&patterns).unwrap();
        let tree = reunion::parser::parse(&joined).unwrap();
        prop_assert!(tree.check().is_ok(), "{:?} reparsed malformed: {:?}", joined, tree.check());
    }
}
