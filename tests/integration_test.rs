// End-to-end tests: source text in, three-address code out

use tacgen::codegen::{generate, Instruction, LabelRef, Operand};
use tacgen::compile;
use tacgen::parser::ast::NodeKind;
use tacgen::parser::lexer::tokenize;
use tacgen::parser::{parse, ParseError};

fn tac(source: &str) -> Vec<String> {
    compile(source).expect("Compilation failed").lines()
}

#[test]
fn test_declarations_and_arithmetic() {
    let source = "int x = 10; int y = 20; int z = x + y * 2;";
    assert_eq!(
        tac(source),
        vec!["x = 10", "y = 20", "t1 = y * 2", "t2 = x + t1", "z = t2"]
    );
}

#[test]
fn test_if_else_labels_all_resolve() {
    let source = r#"
        if (z > 30) {
            int a = 5;
        } else {
            int b = 7;
        }
    "#;

    let lines = tac(source);
    assert_eq!(
        lines,
        vec![
            "t1 = z > 30",
            "if t1 == false goto L1",
            "a = 5",
            "goto L2",
            "label L1",
            "b = 7",
            "label L2",
        ]
    );
    assert!(lines.iter().all(|line| !line.contains('?')));
}

#[test]
fn test_switch_scenario() {
    let source = "switch (x) { case 1: break; case 2: break; default: break; }";
    let lines = tac(source);

    let tests: Vec<&String> = lines.iter().filter(|l| l.starts_with("if x == ")).collect();
    assert_eq!(tests.len(), 2);

    // Jump to default comes before any case body
    let default_jump = lines.iter().position(|l| l == "goto L4").unwrap();
    let first_body = lines.iter().position(|l| l == "label L2").unwrap();
    assert!(default_jump < first_body);

    // Every case body ends with a jump to the shared end label; default does not
    assert_eq!(lines.iter().filter(|l| *l == "goto L1").count(), 2);
    let default_label = lines.iter().position(|l| l == "label L4").unwrap();
    assert_eq!(lines[default_label + 1], "label L1");
    assert_eq!(lines.last().unwrap(), "label L1");
}

#[test]
fn test_array_round_trip() {
    let lines = tac("arr[0] = a; int w = arr[0] + b;");
    assert_eq!(lines, vec!["arr[0] = a", "t1 = arr[0]", "t2 = t1 + b", "w = t2"]);
}

#[test]
fn test_short_circuit_and_skips_right_side_value() {
    let program = compile("r = a && b;").expect("Compilation failed");
    let code = program.instructions();

    // The branch on `a` jumps to the label that assigns the constant
    let (branch_index, label) = code
        .iter()
        .enumerate()
        .find_map(|(i, instr)| match instr {
            Instruction::Branch {
                condition: Operand::Name(name),
                value: Operand::Bool(false),
                target: LabelRef::Resolved(label),
            } if name == "a" => Some((i, *label)),
            _ => None,
        })
        .expect("No branch on a");

    let label_index = program.label_position(label).expect("Label not placed");
    assert!(label_index > branch_index);

    let result = match &code[label_index + 1] {
        Instruction::Copy {
            dest,
            src: Operand::Bool(false),
        } => dest.clone(),
        other => panic!("Expected constant assignment after label, got {}", other),
    };

    // The assignment of b into the result sits between the branch and its target
    let b_copy = code
        .iter()
        .position(|instr| {
            *instr
                == Instruction::Copy {
                    dest: result.clone(),
                    src: Operand::Name("b".to_string()),
                }
        })
        .expect("No copy of b");
    assert!(branch_index < b_copy && b_copy < label_index);
    assert!(code[b_copy + 1].target().is_some());
}

#[test]
fn test_chained_comparison_is_rejected() {
    let err = compile("r = a < b < c;").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error at line 1, column 11: expected ';', found '<'"
    );
}

#[test]
fn test_lex_error_surfaces_unchanged() {
    let err = compile("int x = 1;\nint y = #;").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(
        err.to_string(),
        "Lexer error at line 2, column 9: unexpected character '#'"
    );
}

#[test]
fn test_function_and_call() {
    let source = r#"
        function add(int a, int b) {
            return a + b;
        }

        int result = add(3, 4);
    "#;

    assert_eq!(
        tac(source),
        vec!["t1 = a + b", "return t1", "t2 = call add(3, 4)", "result = t2"]
    );
}

#[test]
fn test_nested_control_flow() {
    let source = r#"
        int i = 0;
        while (i < 3) {
            if (i == 1 || done) {
                break;
            }
            i = i + 1;
        }
    "#;

    assert_eq!(
        tac(source),
        vec![
            "i = 0",
            "label L1",
            "goto L2",
            "label L2",
            "t1 = i < 3",
            "if t1 == false goto L3",
            "t2 = i == 1",
            "if t2 == true goto L4",
            "t3 = done",
            "goto L5",
            "label L4",
            "t3 = true",
            "label L5",
            "if t3 == false goto L6",
            "label L6",
            "t4 = i + 1",
            "i = t4",
            "goto L1",
            "label L3",
        ]
    );
}

#[test]
fn test_tokens_feed_the_parser() {
    let tokens = tokenize("float f = .5; bool ok = !f;").expect("Lexing failed");
    let program = parse(tokens).expect("Parsing failed");
    assert_eq!(program.kind(), NodeKind::Program);
    assert_eq!(
        generate(&program).lines(),
        vec!["f = .5", "t1 = !f", "ok = t1"]
    );
}
