use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};

use slpy::{interpreter, lexer, parser, printer};

fn main() -> Result<()> {
    let mut show_tokens = false;
    let mut pprint = false;
    let mut input_path: Option<String> = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--tokens" => show_tokens = true,
            "--pprint" => pprint = true,
            _ if arg.starts_with('-') => {
                bail!("usage: slpy [--tokens] [--pprint] [file]");
            }
            _ => {
                if input_path.is_some() {
                    bail!("Only one input file is supported");
                }
                input_path = Some(arg);
            }
        }
    }

    let (source_name, source) = match input_path {
        Some(path) => {
            let text = fs::read_to_string(&path).with_context(|| format!("Reading {path}"))?;
            (path, text)
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Reading stdin")?;
            ("<stdin>".to_string(), buffer)
        }
    };

    let mut tokens = lexer::lex(&source_name, &source)?;

    if show_tokens {
        println!("----------------------------------");
        let mut dump = String::from("#");
        while !tokens.at_eof() {
            dump.push_str(&tokens.current().to_string());
            dump.push('#');
            tokens.advance();
        }
        println!("{dump}");
        println!("----------------------------------");
    }

    tokens.reset();
    let program = parser::parse(tokens)?;

    if pprint {
        print!("{}", printer::render(&program));
    } else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut interpreter = interpreter::Interpreter::new(stdin.lock(), stdout.lock());
        interpreter.run(&program)?;
    }

    Ok(())
}
