use gibbon_lang_core::lexer::Tokenizer;
use gibbon_lang_core::parser::Parser;
use gibbon_lang_interpreter::builtins::Builtins;
use gibbon_lang_interpreter::environment::Environment;
use gibbon_lang_interpreter::evaluator;
use gibbon_lang_interpreter::macro_expansion;

pub fn execute(source: &str) {
    let tokenizer = Tokenizer::new(source);
    let mut parser = Parser::new(tokenizer);
    let mut program = match parser.parse_program() {
        Ok(program) => program,
        Err(errors) => {
            eprintln!("Parsing errors: {:?}", errors);
            return;
        }
    };

    let builtins = Builtins::standard();
    let mut macro_environment = Environment::new();
    macro_expansion::define_macros(&mut program, &mut macro_environment);
    let program = macro_expansion::expand_macros(program, &mut macro_environment, &builtins);

    match evaluator::eval_program(&program, &mut Environment::new(), &builtins) {
        Ok(object) => println!("{}", object),
        Err(error) => println!("{}", error),
    }
}
