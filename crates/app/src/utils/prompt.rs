//! Interactive credential prompts

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Password;

/// Ask for a password without echoing it.
///
/// On a terminal the input is hidden. Piped stdin is read as a single line
/// so scripts can still feed the password.
///
/// # Errors
/// Returns the underlying I/O error if stdin cannot be read.
pub fn prompt_password(prompt: &str) -> io::Result<String> {
    if io::stdin().is_terminal() {
        return Password::new().with_prompt(prompt).interact().map_err(io::Error::other);
    }
    read_secret_line(io::stdin().lock())
}

fn read_secret_line(mut input: impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
