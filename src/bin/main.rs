use anyhow::Context;
use std::{env, fs};
use tamarin::{
    eval::{object::Object, Evaluator},
    lexer::{token::TokenSlice, Lexer},
    parser::Parser,
    repl,
};

fn main() -> anyhow::Result<()> {
    let args = env::args().skip(1).collect::<Vec<_>>();

    if args.is_empty() {
        println!("Hello! This is the Tamarin programming language!");
        println!("Feel free to type in commands");
        repl::start()?;
        return Ok(());
    }

    run_all_files(args)
}

// All files of one invocation share an evaluator, so code and data sharing
// between them is possible.
fn run_all_files(paths: Vec<String>) -> anyhow::Result<()> {
    let mut evaluator = Evaluator::new();

    for path in &paths {
        let source =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;

        let tokens = Lexer::new().lex_input(&source);
        let program = Parser::parse(TokenSlice::from_tokens(&tokens));

        if !program.errors.is_empty() {
            for error in &program.errors {
                eprintln!("{}: parse error: {}", path, error);
            }
            anyhow::bail!("{}: {} parse error(s)", path, program.errors.len());
        }

        let result = evaluator.eval(&program);
        if let Object::Error(..) = result {
            anyhow::bail!("{}: {}", path, result);
        }
    }

    Ok(())
}
