//! Quatern REPL (Read-Eval-Print Loop)
//!
//! Evaluates one expression per line. Nothing carries over between lines
//! except the session's parse options.

use std::io;

use crate::{
    cli::output::Output,
    diagnostics::print_error,
    engine::ExecutionPipeline,
    syntax::ParseOptions,
    QuatError,
};

/// REPL state that persists across lines
pub struct ReplState {
    pipeline: ExecutionPipeline,
    line_number: usize,
}

impl ReplState {
    pub fn new(pipeline: ExecutionPipeline) -> Self {
        Self {
            pipeline,
            line_number: 1,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.pipeline.options.strict
    }

    /// Evaluate one line and return its canonical product
    pub fn eval_line(&mut self, input: &str) -> Result<String, QuatError> {
        tracing::debug!(line = self.line_number, "repl input");
        self.line_number += 1;
        self.pipeline.execute(input)
    }
}

/// Main REPL entry point; returns false if reading input failed.
pub fn run_repl(pipeline: &ExecutionPipeline, output: &mut Output) -> bool {
    let mut repl_state = ReplState::new(pipeline.clone());
    let greeting = format!(
        "quatern {} - type :help for help, :quit to exit",
        env!("CARGO_PKG_VERSION")
    );
    if output.banner(&greeting).is_err() {
        return false;
    }

    loop {
        if output.prompt("quatern> ").is_err() {
            return false;
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                println!();
                return true;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                if line.starts_with(':') {
                    match handle_repl_command(line, &mut repl_state) {
                        ReplCommand::Continue => continue,
                        ReplCommand::Quit => return true,
                    }
                }

                match repl_state.eval_line(line) {
                    Ok(result) => {
                        if output.result(&result).is_err() {
                            return false;
                        }
                    }
                    Err(e) => print_error(e),
                }
            }
            Err(e) => {
                print_error(QuatError::io("reading input", e));
                return false;
            }
        }
    }
}

/// REPL command results
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Continue,
    Quit,
}

/// Handle special REPL commands that start with ':'
fn handle_repl_command(command: &str, state: &mut ReplState) -> ReplCommand {
    match command.to_ascii_lowercase().as_str() {
        ":help" | ":h" => {
            println!("Quatern REPL Commands:");
            println!("  :help, :h     Show this help");
            println!("  :quit, :q     Exit the REPL");
            println!("  :strict       Toggle strict parsing");
            println!();
            println!("Enter expressions such as (i+j)(k) to multiply them.");
            ReplCommand::Continue
        }
        ":quit" | ":q" => ReplCommand::Quit,
        ":strict" => {
            let strict = !state.is_strict();
            state.pipeline = ExecutionPipeline::new(ParseOptions { strict });
            println!("Strict parsing {}.", if strict { "on" } else { "off" });
            ReplCommand::Continue
        }
        _ => {
            println!(
                "Unknown command: {}. Type :help for available commands.",
                command
            );
            ReplCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_line_is_independent() {
        let mut state = ReplState::new(ExecutionPipeline::default());
        assert_eq!(state.eval_line("(i+j)(k)").unwrap(), "i-j");
        assert!(state.eval_line("no groups").is_err());
        assert_eq!(state.eval_line("(i)(i)").unwrap(), "-1");
    }

    #[test]
    fn test_strict_toggle() {
        let mut state = ReplState::new(ExecutionPipeline::default());
        assert!(state.eval_line("(2i j)").is_ok());
        assert_eq!(
            handle_repl_command(":strict", &mut state),
            ReplCommand::Continue
        );
        assert!(state.is_strict());
        assert!(state.eval_line("(2i j)").is_err());
    }

    #[test]
    fn test_quit() {
        let mut state = ReplState::new(ExecutionPipeline::default());
        assert_eq!(handle_repl_command(":Q", &mut state), ReplCommand::Quit);
    }
}
