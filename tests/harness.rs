use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, ensure};

use slpy::interpreter::Interpreter;
use slpy::{SlpyError, lexer, parser, printer};

fn normalize_output(output: &str) -> String {
    output.replace("\r\n", "\n").trim_end().to_string()
}

fn run_program(source_name: &str, source: &str, input: &str) -> Result<String, SlpyError> {
    let mut tokens = lexer::lex(source_name, source)?;
    tokens.reset();
    let program = parser::parse(tokens)?;
    let mut output = Vec::new();
    Interpreter::new(Cursor::new(input.as_bytes()), &mut output).run(&program)?;
    Ok(String::from_utf8(output).expect("program output should be UTF-8"))
}

#[test]
fn runs_programs_against_expectation_files() -> Result<()> {
    let programs_dir = Path::new("tests/programs");
    let mut programs = Vec::new();

    for entry in
        fs::read_dir(programs_dir).with_context(|| format!("Reading {}", programs_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("slpy") {
            programs.push(path);
        }
    }

    ensure!(
        !programs.is_empty(),
        "No .slpy programs found in {}",
        programs_dir.display()
    );
    programs.sort();

    for path in programs {
        let source =
            fs::read_to_string(&path).with_context(|| format!("Reading {}", path.display()))?;
        let source_name = path.display().to_string();

        let input_path = path.with_extension("in");
        let input = if input_path.exists() {
            fs::read_to_string(&input_path)
                .with_context(|| format!("Reading {}", input_path.display()))?
        } else {
            String::new()
        };

        let result = run_program(&source_name, &source, &input);

        let expected_error_path = path.with_extension("err");
        if expected_error_path.exists() {
            let expected_error = fs::read_to_string(&expected_error_path)
                .with_context(|| format!("Reading {}", expected_error_path.display()))?;
            let expected_error = expected_error.trim();
            let error = result
                .err()
                .with_context(|| format!("Expected {} to fail", path.display()))?
                .to_string();
            ensure!(
                error.contains(expected_error),
                "Expected error containing '{expected_error}' for {}, got '{error}'",
                path.display()
            );
            continue;
        }

        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path)
            .with_context(|| format!("Reading {}", expected_path.display()))?;
        let output = result.with_context(|| format!("Running {}", path.display()))?;
        assert_eq!(
            normalize_output(&output),
            normalize_output(&expected),
            "Output mismatch for {}",
            path.display()
        );

        // Successful programs must also survive a render/reparse round trip.
        let mut tokens = lexer::lex(&source_name, &source)?;
        tokens.reset();
        let program = parser::parse(tokens)?;
        let once = printer::render(&program);
        let reparsed = slpy::parse_source(&source_name, &once)
            .with_context(|| format!("Reparsing rendering of {}", path.display()))?;
        assert_eq!(
            once,
            printer::render(&reparsed),
            "Unstable rendering for {}",
            path.display()
        );
    }

    Ok(())
}
