use crate::ast::{Block, Expn, Program, Stmt};

/// Renders a program back into canonical SLPY source: one statement per
/// line, every binary expression fully parenthesized, and string prompts
/// re-escaped. Rendering is a pure function of the tree.
pub fn render(program: &Program) -> String {
    render_indented(program, "")
}

/// Renders with a caller-supplied prefix at the start of every line.
pub fn render_indented(program: &Program, indent: &str) -> String {
    let mut out = String::new();
    render_block(&mut out, &program.block, indent);
    out
}

fn render_block(out: &mut String, block: &Block, indent: &str) {
    for stmt in &block.stmts {
        render_statement(out, stmt, indent);
    }
}

fn render_statement(out: &mut String, stmt: &Stmt, indent: &str) {
    out.push_str(indent);
    match stmt {
        Stmt::Assign { name, expn, .. } => {
            out.push_str(name);
            out.push_str(" = ");
            render_expression(out, expn);
        }
        Stmt::Print { expn, .. } => {
            out.push_str("print(");
            render_expression(out, expn);
            out.push(')');
        }
        Stmt::Pass { .. } => out.push_str("pass"),
    }
    out.push('\n');
}

fn render_expression(out: &mut String, expn: &Expn) {
    match expn {
        Expn::Binary {
            op, left, right, ..
        } => {
            out.push('(');
            render_expression(out, left);
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
            render_expression(out, right);
            out.push(')');
        }
        Expn::Number { value, .. } => out.push_str(&value.to_string()),
        Expn::Lookup { name, .. } => out.push_str(name),
        Expn::Input { prompt, .. } => {
            out.push_str("input(\"");
            out.push_str(&re_escape(prompt));
            out.push_str("\")");
        }
    }
}

/// Replaces special characters with their escape sequences, the inverse of
/// the decoding done when a string literal token is consumed.
fn re_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::parser;
    use indoc::indoc;

    fn parse_source(source: &str) -> Program {
        let mut tokens = lexer::lex("test.slpy", source).expect("lexing should succeed");
        tokens.reset();
        parser::parse(tokens).expect("parsing should succeed")
    }

    #[test]
    fn fully_parenthesizes_binary_expressions() {
        let program = parse_source("x=1+2*3\n");
        assert_eq!(render(&program), "x = (1 + (2 * 3))\n");
    }

    #[test]
    fn renders_one_statement_per_line() {
        let input = indoc! {"
            x   =    3
            pass
            print(x // 2)
        "};
        let program = parse_source(input);
        assert_eq!(render(&program), "x = 3\npass\nprint((x // 2))\n");
    }

    #[test]
    fn re_escapes_input_prompts() {
        let program = parse_source("x = input(\"a\\\"b\\n\\t\\\\c\")\n");
        assert_eq!(render(&program), "x = input(\"a\\\"b\\n\\t\\\\c\")\n");
    }

    #[test]
    fn prefixes_every_line_with_the_given_indent() {
        let program = parse_source("pass\nprint(1)\n");
        assert_eq!(render_indented(&program, "    "), "    pass\n    print(1)\n");
    }

    #[test]
    fn rendering_is_idempotent() {
        let program = parse_source("y = (1 - 2) - int(3)\nprint(y)\n");
        assert_eq!(render(&program), render(&program));
    }

    #[test]
    fn rendered_text_reparses_to_the_same_rendering() {
        let input = indoc! {"
            x = 10 // 3 + 4 * 2
            y = input(\"n? \") - x
            pass
            print(y - 1 - 2)
        "};
        let once = render(&parse_source(input));
        let twice = render(&parse_source(&once));
        assert_eq!(once, twice);
    }
}
