//! Chat command handler: interactive question-answering loop.

use super::build_pipeline;
use clap::Args;
use docrag_core::{AppConfig, AppResult};
use std::io::{BufRead, Write};

/// Interactive question-answering loop
#[derive(Args, Debug)]
pub struct ChatCommand {}

impl ChatCommand {
    /// Execute the chat command.
    ///
    /// Reads one question per line from stdin. `exit`/`quit` (case
    /// insensitive) or end of input ends the session.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let pipeline = build_pipeline(config)?;

        println!("docrag chat (type 'exit' to quit)\n");

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            print!("You: ");
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            let question = line.trim();
            if question.is_empty() {
                continue;
            }

            if is_exit_word(question) {
                break;
            }

            match pipeline.answer(question).await {
                Ok(result) => println!("\nAnswer:\n{}\n", result.answer),
                Err(e) => eprintln!("\nError generating answer: {}\n", e),
            }
        }

        Ok(())
    }
}

fn is_exit_word(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "exit" | "quit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        assert!(is_exit_word("exit"));
        assert!(is_exit_word("QUIT"));
        assert!(is_exit_word("Exit"));
        assert!(!is_exit_word("exits"));
        assert!(!is_exit_word("what is rust"));
    }
}
