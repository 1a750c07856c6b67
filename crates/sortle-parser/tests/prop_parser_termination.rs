use proptest::prelude::*;
use sortle_parser::parse;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    // The parser either produces a program or an error; arbitrary input
    // must never panic or hang.
    #[test]
    fn parser_never_panics(source in ".{0,300}") {
        let _ = parse(&source);
    }

    // Whatever parses comes out sorted with unique, all-letter names.
    #[test]
    fn parsed_programs_honor_the_engine_contract(source in "[a-z :=0-9\"#\n+*/%^$~?]{0,120}") {
        if let Ok(program) = parse(&source) {
            for pair in program.windows(2) {
                prop_assert!(pair[0].name < pair[1].name);
            }
            for expression in &program {
                prop_assert!(!expression.name.is_empty());
                prop_assert!(expression.name.chars().all(|c| c.is_ascii_alphabetic()));
            }
        }
    }
}
