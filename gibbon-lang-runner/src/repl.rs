use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use gibbon_lang_core::lexer::Tokenizer;
use gibbon_lang_core::parser::Parser;
use gibbon_lang_interpreter::builtins::Builtins;
use gibbon_lang_interpreter::environment::Environment;
use gibbon_lang_interpreter::evaluator;
use gibbon_lang_interpreter::macro_expansion;

const PROMPT: &str = ">> ";

pub fn start() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;

    let builtins = Builtins::standard();
    let mut environment = Environment::new();
    // Macro definitions accumulate across lines in their own scope
    let mut macro_environment = Environment::new();

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };
        rl.add_history_entry(&line)?;

        let tokenizer = Tokenizer::new(&line);
        let mut parser = Parser::new(tokenizer);
        let mut program = match parser.parse_program() {
            Ok(program) => program,
            Err(errors) => {
                println!("Parsing errors: {:?}", errors);
                continue;
            }
        };

        macro_expansion::define_macros(&mut program, &mut macro_environment);
        let program = macro_expansion::expand_macros(program, &mut macro_environment, &builtins);

        match evaluator::eval_program(&program, &mut environment, &builtins) {
            Ok(object) => println!("{}", object),
            Err(error) => println!("{}", error),
        }
    }
    Ok(())
}
