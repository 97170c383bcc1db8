use eggscript::egg_frontend::errors::ParserErrorType;
use eggscript::treewalk_interpreter::{Interpreter, RuntimeError, Value};
use eggscript::{
    evaluate_one_expression, execute_program_with_output, parse_one_expression,
    parse_one_statement, parse_program, tokenize, EggError,
};

fn eval(source: &str) -> Result<Value, EggError> {
    evaluate_one_expression(&parse_one_expression(source)?)
}

fn run(source: &str) -> (Result<(), EggError>, String) {
    let mut output = Vec::new();
    let result = execute_program_with_output(source, &mut output);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn arithmetic_matches_host_numbers() {
    assert_eq!(eval("15 + 5").unwrap(), Value::Number(20.0));
    assert_eq!(eval("15 - 5").unwrap(), Value::Number(10.0));
    assert_eq!(eval("15 * 5").unwrap(), Value::Number(75.0));
    assert_eq!(eval("15 / 5").unwrap(), Value::Number(3.0));
    assert_eq!(eval("0.1 * 3").unwrap(), Value::Number(0.1 * 3.0));
    assert_eq!(eval("2.5 / 0.5").unwrap(), Value::Number(2.5 / 0.5));
}

#[test]
fn string_concatenation_is_ordered() {
    let left_right = eval(r#""left" + "right""#).unwrap();
    let right_left = eval(r#""right" + "left""#).unwrap();
    assert_eq!(left_right, Value::String("leftright".to_owned()));
    assert_ne!(left_right, right_left);
}

#[test]
fn multiplication_binds_tighter() {
    assert_eq!(eval("5 * 6 + 2").unwrap(), Value::Number(32.0));
    assert_eq!(eval("2 + 5 * 6").unwrap(), Value::Number(32.0));
}

#[test]
fn unary_operators_chain() {
    assert_eq!(eval("--15").unwrap(), Value::Number(15.0));
    assert_eq!(eval("!!true").unwrap(), Value::Boolean(true));
    assert_eq!(eval("-+-2").unwrap(), Value::Number(2.0));
}

#[test]
fn equality_is_type_strict() {
    assert_eq!(eval("2.5 == -6").unwrap(), Value::Boolean(false));
    assert!(matches!(
        eval(r#""hi" == 5"#),
        Err(EggError::Runtime(RuntimeError::IllegalInfixOperation(..)))
    ));
}

#[test]
fn declared_variables_compare() {
    let mut interpreter = Interpreter::new_with_output(Vec::new());
    let decl = parse_one_statement("var X [num] = 4;").unwrap();
    interpreter.eval_statement(&decl).unwrap();

    let greater = parse_one_expression("X > 2").unwrap();
    let less = parse_one_expression("2 > X").unwrap();
    assert_eq!(interpreter.eval_expression(&greater), Ok(Value::Boolean(true)));
    assert_eq!(interpreter.eval_expression(&less), Ok(Value::Boolean(false)));
}

#[test]
fn uninitialized_variables_must_be_assigned_first() {
    let mut interpreter = Interpreter::new_with_output(Vec::new());
    let decl = parse_one_statement("var y [string];").unwrap();
    interpreter.eval_statement(&decl).unwrap();

    let read = parse_one_expression("y + \"!\"").unwrap();
    assert_eq!(
        interpreter.eval_expression(&read),
        Err(RuntimeError::UninitializedVariable("y".to_owned()))
    );

    let assign = parse_one_statement("y = \"egg\";").unwrap();
    interpreter.eval_statement(&assign).unwrap();
    assert_eq!(
        interpreter.eval_expression(&read),
        Ok(Value::String("egg!".to_owned()))
    );
}

#[test]
fn constants_cannot_change() {
    let (result, _) = run("const c [num] = 1;\nc = 1;");
    assert!(matches!(
        result,
        Err(EggError::Runtime(RuntimeError::ConstantReassignment(_)))
    ));

    match parse_program("const c [num];") {
        Err(EggError::Syntax(e)) => {
            assert_eq!(e.error, ParserErrorType::UninitializedConstant("c".to_owned()))
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn conditionals_run_one_branch() {
    let (result, output) = run("if true { print(1); } else { print(2); }");
    result.unwrap();
    assert_eq!(output, "1\n");

    let (result, output) =
        run("if false { print(1); } else if true { print(2); } else { print(3); }");
    result.unwrap();
    assert_eq!(output, "2\n");
}

#[test]
fn statements_need_terminators() {
    let (result, output) = run("print(\"hello\")");
    assert!(matches!(result, Err(EggError::Syntax(_))));
    assert_eq!(output, "");

    let error = parse_program("print(\"hello\")").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Expected `;` after statement, but instead got end of file at 1:15"
    );
}

#[test]
fn empty_program_does_nothing() {
    let (result, output) = run("");
    result.unwrap();
    assert_eq!(output, "");

    let (result, output) = run("  // just a comment\n");
    result.unwrap();
    assert_eq!(output, "");
}

#[test]
fn lex_errors_report_offset_and_character() {
    let error = tokenize("var x [num] = 1 # 2;").unwrap_err();
    assert_eq!(error.character, '#');
    assert_eq!(error.position.byte_pos, 16);
    assert_eq!(
        error.to_string(),
        "Unexpected character '#' at offset 16 (1:17)"
    );
}

#[test]
fn runs_are_independent() {
    let (result, _) = run("var shared [num] = 1;");
    result.unwrap();

    // A second run starts from an empty environment.
    let (result, _) = run("print(shared);");
    assert!(matches!(
        result,
        Err(EggError::Runtime(RuntimeError::UndeclaredVariable(_)))
    ));
    let (result, _) = run("var shared [string] = \"again\";");
    result.unwrap();
}

#[test]
fn runtime_errors_keep_earlier_output() {
    let (result, output) = run("print(\"a\");\nprint(1 + \"b\");\nprint(\"c\");");
    assert!(matches!(result, Err(EggError::Runtime(_))));
    assert_eq!(output, "a\n");
}
