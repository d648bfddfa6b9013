use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use expression_calculator::evaluator;
use expression_calculator::session::{format_result, Calculator, SessionError};
use std::io;
use std::io::{BufRead, Write};

/// Evaluates the given arithmetic expression
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate; starts an interactive session when omitted
    expression: Option<String>,

    #[clap(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.expression {
        Some(expression) => evaluate_once(expression),
        None => run_interactive(),
    }
}

fn evaluate_once(expression: String) -> Result<()> {
    let tokens = evaluator::lexer::tokenize(expression)?;
    log::debug!("tokens: {:?}", tokens);
    let echo = evaluator::tokens_to_string(tokens.clone())?;
    let postfix_tokens = evaluator::parser::parse(tokens)?;
    log::debug!("postfix: {:?}", postfix_tokens);
    let result = evaluator::stack_machine::evaluate_postfix(postfix_tokens)?;
    println!("{} = {}", echo, format_result(result));
    Ok(())
}

const INTERACTIVE_HELP: &str = "\
Type digits and operators (+ - * / % **) to build an expression.
Commands:
  =                  evaluate the current expression
  clear              reset the expression
  del                remove the last entry
  pi, e              insert a constant
  sq, sqrt, inv, abs, fact, exp, ln, log, tenpow, neg
                     apply a function to the current value
  sin, cos, tan      trigonometry in degrees
  quit               leave the session";

fn run_interactive() -> Result<()> {
    let mut calculator = Calculator::new();
    println!("{}", INTERACTIVE_HELP);
    show_prompt(&calculator)?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => {}
            "quit" | "exit" => return Ok(()),
            "help" => println!("{}", INTERACTIVE_HELP),
            "clear" => calculator.clear(),
            "del" => calculator.backspace(),
            "pi" => calculator.append_pi(),
            "e" => calculator.append_e(),
            "=" => match calculator.evaluate() {
                Ok(Some(result)) => println!("= {}", result),
                Ok(None) => {}
                Err(error) => report_error(&mut calculator, &error),
            },
            input => match apply_function(&mut calculator, input) {
                Some(Ok(result)) => println!("= {}", result),
                Some(Err(error)) => report_error(&mut calculator, &error),
                None => calculator.append(input),
            },
        }
        show_prompt(&calculator)?;
    }
    Ok(())
}

/// Runs the session operation named by the command, or returns `None` when
/// the input is not a command and should be appended to the expression.
fn apply_function(
    calculator: &mut Calculator,
    command: &str,
) -> Option<Result<f64, SessionError>> {
    let result = match command {
        "sq" => calculator.square(),
        "sqrt" => calculator.square_root(),
        "inv" => calculator.reciprocal(),
        "abs" => calculator.absolute(),
        "fact" => calculator.factorial(),
        "exp" => calculator.exponential(),
        "ln" => calculator.natural_log(),
        "log" => calculator.logarithm(),
        "tenpow" => calculator.ten_power(),
        "neg" => calculator.toggle_sign(),
        "sin" => calculator.sine(),
        "cos" => calculator.cosine(),
        "tan" => calculator.tangent(),
        _ => return None,
    };
    Some(result)
}

/// Shows the error and resets the input state, taking the place of the
/// transient error display of a graphical calculator.
fn report_error(calculator: &mut Calculator, error: &SessionError) {
    log::warn!("{}", error);
    println!("error: {}", error);
    calculator.clear();
}

fn show_prompt(calculator: &Calculator) -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "[{}] ", calculator.expression())?;
    stdout.flush()?;
    Ok(())
}
