use std::{
    fs::{read_dir, read_to_string},
    io::Write,
    panic::AssertUnwindSafe,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use color_eyre::{eyre::Context, Result};
use goofy::{
    interpreter::{
        context::BufferedContext,
        environment::Environment,
        error::{InterpretError, RuntimeErrorKind},
        formatter::{BasicFormatter, DebugFormatter, ErrorFormatter},
        run, Interpreter, Value,
    },
    lexer::tokenize,
};

#[test]
fn test_declaration() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/declaration");
    test_engine(input_dir)
}

#[test]
fn test_print() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/print");
    test_engine(input_dir)
}

#[test]
fn test_arithmetic() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/arithmetic");
    test_engine(input_dir)
}

#[test]
fn test_concat() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/concat");
    test_engine(input_dir)
}

#[test]
fn test_conditional() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/conditional");
    test_engine(input_dir)
}

#[test]
fn test_comments() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/comments");
    test_engine(input_dir)
}

#[test]
fn test_errors() -> Result<()> {
    let input_dir = Path::new("./test_data/interpreter/errors");
    test_engine(input_dir)
}

#[test]
fn test_state_is_shared_between_runs() -> Result<()> {
    let mut interpreter = Interpreter::new();
    for path in test_files(Path::new("./test_data/interpreter/state"))? {
        let test_case = parse_test_case(&path)?;
        test_case.check(&mut interpreter);
    }
    Ok(())
}

struct TestCase {
    name: String,
    source: String,
    output: String,
    errors: String,
}

impl TestCase {
    pub fn check(&self, interpreter: &mut Interpreter) {
        let mut context = BufferedContext::new();
        let errors = match interpreter.interpret(&self.source, &mut context) {
            Ok(()) => String::new(),
            Err(InterpretError::Lexical(e)) => format!("[Lexical] {e}"),
            Err(InterpretError::Runtime(e)) => format!("[Runtime] {e}"),
        };
        assert_eq!(self.errors, errors, "Failed test {} at runtime.", self.name);
        assert_eq!(
            self.output,
            context.into_data(),
            "Failed test {} at print.",
            self.name
        );
    }
}

fn test_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in read_dir(input_dir).context("Failed to open input test data folder")? {
        let path = entry?.path();
        if path.extension().is_some_and(|extension| extension == "goof") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn test_engine(input_dir: &Path) -> Result<()> {
    let mut succeeded = true;
    for path in test_files(input_dir)? {
        println!("Parsing {path:?}");
        let test_case = parse_test_case(&path)?;
        println!("Checking {}", test_case.name);

        let res = std::panic::catch_unwind(AssertUnwindSafe(|| {
            let mut interpreter = Interpreter::new();
            test_case.check(&mut interpreter);
        }));
        if res.is_err() {
            println!("\tFails test case {}", test_case.name);
            succeeded = false;
        }
    }

    assert!(succeeded, "At least one interpreter test case failed");

    Ok(())
}

fn parse_test_case(input_path: &Path) -> Result<TestCase> {
    let test_name = AsRef::<Path>::as_ref(
        input_path
            .file_name()
            .expect("File name can't be none as the path is to a real file."),
    )
    .to_string_lossy()
    .into_owned();

    let source = read_to_string(input_path).context("Failed to open input test data file")?;

    let mut output = String::new();
    let mut errors = Vec::new();
    for line in source.lines() {
        if let Some((_, expected)) = line.split_once("# expect:") {
            output.push_str(expected.trim());
            output.push('\n');
        } else if let Some((_, expected)) = line.split_once("# expect runtime error:") {
            errors.push(format!("[Runtime] {}", expected.trim()));
        } else if let Some((_, expected)) = line.split_once("# expect lexical error:") {
            errors.push(format!("[Lexical] {}", expected.trim()));
        }
    }

    Ok(TestCase {
        name: test_name,
        source,
        output,
        errors: errors.join("\n"),
    })
}

// Direct checks

fn interpret(source: &str) -> (String, Result<(), InterpretError>) {
    let mut interpreter = Interpreter::new();
    let mut context = BufferedContext::new();
    let result = interpreter.interpret(source, &mut context);
    (context.into_data(), result)
}

fn output_of(source: &str) -> String {
    let (output, result) = interpret(source);
    assert_eq!(result, Ok(()), "{source} should run cleanly");
    output
}

#[test]
fn declared_sum_is_printed() {
    assert_eq!(output_of("bruh x = 5 twin 3\nitsgiving(x)"), "8\n");
}

#[test]
fn declared_concatenation_is_printed() {
    assert_eq!(output_of("bruh s = \"ab\" gyat \"cd\"\nitsgiving(s)"), "abcd\n");
}

#[test]
fn division_by_zero_is_zero() {
    assert_eq!(output_of("bruh y = 10 ratio 0\nitsgiving(y)"), "0\n");
}

#[test]
fn greater_condition_picks_a_branch() {
    let taken = output_of(r#"lethimcook 5 bigflex 3 bet { itsgiving("yes") } naur { itsgiving("no") }"#);
    assert_eq!(taken.lines().next(), Some("yes"));
    // The else block is not skipped after a taken branch.
    assert_eq!(taken, "yes\nno\n");

    let not_taken =
        output_of(r#"lethimcook 3 bigflex 5 bet { itsgiving("yes") } naur { itsgiving("no") }"#);
    assert_eq!(not_taken, "no\n");
}

#[test]
fn tea_prefixed_identifier_is_never_bound() {
    let tokens = tokenize("bruh teapot = 1\nitsgiving(\"after\")").expect("valid input");
    let mut environment = Environment::new();
    let mut context = BufferedContext::new();
    run(&tokens, &mut environment, &mut context).expect("runs");
    assert!(!environment.contains("teapot"));
    // The declaration took the next line's keyword as its name instead.
    assert_eq!(
        environment.get("itsgiving"),
        Some(&Value::String("after".into()))
    );
    assert_eq!(context.into_data(), "");
}

#[test]
fn unbound_identifier_prints_zero() {
    assert_eq!(output_of("itsgiving(ghost)"), "0\n");
}

#[test]
fn nested_block_ends_the_outer_block_early() {
    let source = r#"
lethimcook 2 bigflex 1 bet {
  lethimcook 1 bigflex 2 bet { itsgiving("inner") }
  itsgiving("outer tail")
}
itsgiving("done")
"#;
    // The outer block stops at the inner "}", so the tail and the stray "}" are met by
    // the top-level walk.
    assert_eq!(output_of(source), "inner\nouter tail\ndone\n");
}

#[test]
fn skipped_block_balances_nested_braces() {
    let source = r#"
lethimcook 1 bigflex 2 bet {
  lethimcook 2 bigflex 1 bet { itsgiving("inner") }
  itsgiving("outer tail")
} naur {
  itsgiving("else")
}
"#;
    assert_eq!(output_of(source), "else\n");
}

#[test]
fn missing_then_is_fatal_for_either_outcome() {
    for source in ["lethimcook 2 bigflex 1 itsgiving(1)", "lethimcook 1 bigflex 2 itsgiving(1)"] {
        let (output, result) = interpret(source);
        assert_eq!(output, "");
        let Err(InterpretError::Runtime(error)) = result else {
            panic!("{source} should fail at runtime");
        };
        assert!(matches!(error.kind, RuntimeErrorKind::UnexpectedEnd { .. }));
    }
}

#[test]
fn missing_right_parenthesis_is_tolerated() {
    assert_eq!(output_of("itsgiving(1 itsgiving(2)"), "1\n2\n");
}

#[test]
fn declaration_with_missing_value_is_fatal() {
    let (_, result) = interpret("bruh x");
    let Err(InterpretError::Runtime(error)) = result else {
        panic!("declaration without value should fail");
    };
    assert_eq!(error.kind, RuntimeErrorKind::UnexpectedEnd { index: 3 });
    assert_eq!(error.code(), "RT001");
}

#[test]
fn failed_declaration_keeps_earlier_bindings() {
    let mut interpreter = Interpreter::new();
    let mut context = BufferedContext::new();
    interpreter
        .interpret("bruh x = 1", &mut context)
        .expect("first program runs");
    let result = interpreter.interpret("bruh x = \"a\" flop 1", &mut context);
    assert!(result.is_err());
    assert_eq!(interpreter.environment().get("x"), Some(&Value::Integer(1)));
}

#[test]
fn malformed_number_is_a_runtime_fault() {
    let (output, result) = interpret("itsgiving(1) bruh v = 1.2.3");
    assert_eq!(output, "");
    let Err(InterpretError::Runtime(error)) = result else {
        panic!("malformed number should be a runtime fault");
    };
    assert_eq!(
        error.kind,
        RuntimeErrorKind::MalformedNumber {
            lexeme: "1.2.3".into()
        }
    );
}

#[test]
fn unrecognized_character_is_a_lexical_error() {
    let (output, result) = interpret("itsgiving(1)\nbruh x = 1 + 2");
    assert_eq!(output, "");
    let Err(error @ InterpretError::Lexical(_)) = result else {
        panic!("+ should not scan");
    };
    assert_eq!(
        BasicFormatter.format_error(&error),
        "Invalid character + at line 2, column 11"
    );
}

#[test]
fn separate_environments_do_not_share_bindings() {
    let first = tokenize("bruh a = 1").expect("valid input");
    let second = tokenize("itsgiving(a)").expect("valid input");
    let mut context = BufferedContext::new();

    let mut shared = Environment::new();
    run(&first, &mut shared, &mut context).expect("runs");
    run(&second, &mut shared, &mut context).expect("runs");

    let mut fresh = Environment::new();
    run(&second, &mut fresh, &mut context).expect("runs");

    assert_eq!(context.into_data(), "1\n0\n");
}

#[test]
fn wide_integer_literal_is_a_float() {
    assert_eq!(output_of("bruh big = 99999999999999999999\nitsgiving(big)"), "1e+20\n");
}

#[test]
fn debug_format_names_the_error_kind() {
    let (_, result) = interpret("bruh x");
    let error = result.expect_err("declaration without value should fail");
    let formatted = DebugFormatter.format_error(&error);
    assert!(
        formatted.starts_with("Runtime(RuntimeError { kind: UnexpectedEnd { index: 3 }"),
        "{formatted}"
    );
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn stepped_over_tokens_are_traced() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let output = tracing::subscriber::with_default(subscriber, || output_of("} itsgiving(1)"));
    assert_eq!(output, "1\n");

    let logs = String::from_utf8(buffer.0.lock().expect("buffer lock").clone()).expect("utf-8 logs");
    assert!(logs.contains("skipped token"), "{logs}");
    assert!(logs.contains("kind=RBRACE"), "{logs}");
}
