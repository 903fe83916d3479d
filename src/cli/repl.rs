//! Command handlers for one-shot and interactive use.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::agent::{Agent, SearchMode};
use crate::error::ScoutError;

/// What to show the user for a finished run.
///
/// Recoverable failures become their user-facing message; anything else
/// stays an error.
pub fn render_result(result: Result<String, ScoutError>) -> Result<String, ScoutError> {
    match result {
        Ok(answer) => Ok(answer),
        Err(e) => match e.user_message() {
            Some(message) => Ok(message.to_string()),
            None => Err(e),
        },
    }
}

/// Handle `scout ask`.
pub async fn handle_ask(
    agent: &Agent,
    question: &str,
    mode: SearchMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let answer = render_result(agent.run_with(question, mode).await)?;
    println!("{answer}");
    Ok(())
}

/// Handle `scout repl`.
pub async fn handle_repl(agent: &Agent, mode: SearchMode) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Ask a question (type `exit` to quit).");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            break;
        }

        match render_result(agent.run_with(line, mode).await) {
            Ok(answer) => println!("{answer}\n"),
            Err(e) => eprintln!("Error: {e}\n"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EXTRACTION_FAILED_MESSAGE, INVALID_QUERY_MESSAGE};

    #[test]
    fn recoverable_errors_render_as_messages() {
        assert_eq!(
            render_result(Err(ScoutError::InvalidQuery)).unwrap(),
            INVALID_QUERY_MESSAGE
        );
        assert_eq!(
            render_result(Err(ScoutError::ExtractionFailed)).unwrap(),
            EXTRACTION_FAILED_MESSAGE
        );
        assert!(render_result(Err(ScoutError::upstream(500, "x"))).is_err());
        assert_eq!(render_result(Ok("hi".into())).unwrap(), "hi");
    }
}
