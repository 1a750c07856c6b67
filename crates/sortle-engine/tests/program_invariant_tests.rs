//! Whole-program runs through the parser and engine, with the list
//! invariants checked after every rewrite.

use sortle_engine::{Interpreter, ProgramState, StepOutcome};

fn interpreter(source: &str) -> Interpreter {
    let program = match sortle_parser::parse(source) {
        Ok(program) => program,
        Err(error) => panic!("parse failed: {error}"),
    };
    match ProgramState::new(program) {
        Ok(state) => Interpreter::new(state),
        Err(error) => panic!("bad initial state: {error}"),
    }
}

fn check_invariants(interp: &Interpreter) {
    let entries = interp.state().entries();
    assert!(!entries.is_empty(), "state must never empty out");
    for expression in entries {
        assert!(!expression.name.is_empty(), "live names are never empty");
    }
    for pair in entries.windows(2) {
        assert!(
            pair[0].name < pair[1].name,
            "names out of order: {} >= {}",
            pair[0].name,
            pair[1].name
        );
    }
    assert!(interp.ip() < entries.len(), "pointer out of range");
}

/// Run to completion with a step bound, checking invariants throughout.
fn run_checked(source: &str, max_steps: usize) -> String {
    let mut interp = interpreter(source);
    check_invariants(&interp);
    for _ in 0..max_steps {
        if interp.is_halted() {
            break;
        }
        match interp.step() {
            Ok(_) => check_invariants(&interp),
            Err(error) => panic!("step failed: {error}"),
        }
    }
    match interp.output() {
        Some(name) => name.to_string(),
        None => panic!("program did not halt within {max_steps} steps"),
    }
}

#[test]
fn addition_renames_and_outputs() {
    assert_eq!(run_checked("a := 1 2 +\nb := 0\n", 10), "3");
}

#[test]
fn single_expression_outputs_its_own_name() {
    assert_eq!(run_checked("lonely := 0\n", 10), "lonely");
}

#[test]
fn two_stable_strings_keep_cycling_sorted() {
    // both expressions rename to their current names forever; drive a few
    // rounds and verify the order never breaks, then check non-halting
    let mut interp = interpreter("a := \"a\"\nb := \"b\"\n");
    for _ in 0..8 {
        assert!(!interp.is_halted());
        interp.step().unwrap();
        check_invariants(&interp);
    }
    assert_eq!(interp.state().len(), 2);
}

#[test]
fn deletion_shrinks_the_program() {
    assert_eq!(run_checked("a := 0\nb := \"win\"\nc := 0\n", 10), "win");
}

#[test]
fn clobber_through_match_merges_expressions() {
    let source = "a := \"bb\" 0 ?\nbb := \"bb\"\n";
    assert_eq!(run_checked(source, 10), "bb");
}

#[test]
fn capture_rewrites_into_part_of_a_name() {
    // zz matches d. against "dog" capturing nothing -> whole? pattern (d.)
    // captures "do": zz renames to "do", then both delete down to one
    let source = "dog := \"dog\"\nzz := \"(d.).\" 0 ?\n";
    let mut interp = interpreter(source);
    // step "dog" first: keeps its name
    interp.step().unwrap();
    let outcome = interp.step().unwrap();
    assert_eq!(
        outcome,
        StepOutcome::Renamed { old: "zz".to_string(), new: "do".to_string() }
    );
    check_invariants(&interp);
}

#[test]
fn concat_builds_growing_names() {
    // c concatenates itself a new name out of string pieces, then wins by
    // deleting the helper
    let source = "c := \"ab\" \"cd\" ~\nd := 0\n";
    assert_eq!(run_checked(source, 10), "abcd");
}

#[test]
fn max_operator_picks_the_later_name() {
    let source = "m := \"apple\" \"pear\" ^\nn := 0\n";
    assert_eq!(run_checked(source, 10), "pear");
}

#[test]
fn division_and_remainder_chain() {
    // 17 / 5 = 3, then 3 % 2 = 1
    let source = "q := 17 5 / 2 %\nr := 0\n";
    assert_eq!(run_checked(source, 10), "1");
}

#[test]
fn numeric_rename_then_delete_round() {
    // first step renames a to 10; second round evaluates the body again
    // under the new name; the helper deletes itself
    let source = "a := 5 2 *\nhelper := 0\n";
    assert_eq!(run_checked(source, 10), "10");
}
