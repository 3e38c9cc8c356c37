use std::{
    io,
    io::{stdin, stdout, BufRead, Write},
};

use crate::{
    eval::Evaluator,
    lexer::{token::TokenSlice, Lexer},
    parser::Parser,
};

pub const PROMPT: &str = ">> ";

/// Read-lex-parse-eval-print loop. The evaluator (and with it the root
/// environment) persists across lines, so bindings survive between inputs.
pub fn start() -> io::Result<()> {
    let mut buffer = String::new();

    let stdin = stdin();

    let mut stdout = stdout();

    let mut evaluator = Evaluator::new();

    loop {
        write!(stdout, "{}", PROMPT)?;

        stdout.flush()?;

        buffer.clear();
        if stdin.lock().read_line(&mut buffer)? == 0 {
            return Ok(());
        }

        let tokens = Lexer::new().lex_input(&buffer);
        let program = Parser::parse(TokenSlice::from_tokens(&tokens));

        if !program.errors.is_empty() {
            for error in &program.errors {
                writeln!(stdout, "\tparse error: {}", error)?;
            }
            continue;
        }

        writeln!(stdout, "{}", evaluator.eval(&program))?;
    }
}
