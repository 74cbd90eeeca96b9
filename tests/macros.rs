#[allow(unused_macros)]

macro_rules! assert_join {
    ($patterns:expr, $expected:expr) => {{
        let joined = reunion::join($patterns).unwrap();
        assert_eq!(
            joined, $expected,
            r#"expected {:?} to assemble into "{}""#,
            $patterns, $expected
        );
    }};
}

#[allow(unused_macros)]
macro_rules! assert_same_language {
    ($patterns:expr, $corpus:expr) => {{
        let joined = reunion::join($patterns).unwrap();
        let combined = anchored(&joined);
        for s in $corpus.iter() {
            let expected = $patterns.iter().any(|p| anchored(p).is_match(s));
            assert_eq!(
                combined.is_match(s),
                expected,
                r#""{}" and {:?} disagree on "{}""#,
                joined,
                $patterns,
                s
            );
        }
    }};
}

/// Compile a pattern for whole-string matching with the oracle engine.
#[allow(dead_code)]
fn anchored(pattern: &str) -> regex::Regex {
    regex::Regex::new(&format!("^(?s:{})$", pattern))
        .unwrap_or_else(|err| panic!("emitted pattern `{}` failed to compile: {}", pattern, err))
}
