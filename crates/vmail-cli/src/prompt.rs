//! Interactive input: reset confirmation and new user passwords

use std::io::{self, BufRead, IsTerminal, Write};
use tracing::debug;

/// Password entry attempts before add-user gives up
pub const DEFAULT_PASSWORD_ATTEMPTS: usize = 3;

const PASSWORD_PROMPT: &str = "Enter user password: ";
const REPEAT_PROMPT: &str = "Repeat user password: ";

/// Source of answers the operator types in
pub trait Prompt {
    /// Ask a yes/no question; only `yes` (any case) confirms
    fn confirm(&mut self, question: &str) -> io::Result<bool>;

    /// Read a new password, `None` when none could be obtained
    fn password(&mut self) -> io::Result<Option<String>>;
}

/// Prompt backed by the process terminal and stdin
pub struct TerminalPrompt {
    max_attempts: usize,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            max_attempts: DEFAULT_PASSWORD_ATTEMPTS,
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }

    fn password(&mut self) -> io::Result<Option<String>> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            debug!("Prompting for password on terminal");
            read_confirmed(
                |prompt: &str| rpassword::prompt_password(prompt),
                &mut io::stdout(),
                self.max_attempts,
            )
        } else {
            debug!("Reading password from stdin");
            read_piped(&mut stdin.lock())
        }
    }
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Read a password twice until both entries match.
///
/// Returns `None` once `max_attempts` pairs have been entered without a match.
pub fn read_confirmed<F>(
    mut read: F,
    out: &mut dyn Write,
    max_attempts: usize,
) -> io::Result<Option<String>>
where
    F: FnMut(&str) -> io::Result<String>,
{
    for attempt in 1..=max_attempts {
        let password = read(PASSWORD_PROMPT)?;
        let confirmation = read(REPEAT_PROMPT)?;

        if password == confirmation {
            return Ok(Some(password));
        }

        writeln!(out, "Input did not match, please try again")?;
        debug!(attempt, max_attempts, "Password confirmation mismatch");
    }

    writeln!(out, "Exceeded maximum number of input attempts")?;
    Ok(None)
}

/// Single password line from a pipe, without its line terminator
pub fn read_piped(input: &mut dyn BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let password = line.strip_suffix('\n').unwrap_or(&line);
    let password = password.strip_suffix('\r').unwrap_or(password);
    Ok(Some(password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    fn scripted(answers: &[&str]) -> impl FnMut(&str) -> io::Result<String> {
        let mut answers: VecDeque<String> = answers.iter().map(|s| s.to_string()).collect();
        move |_prompt| {
            answers
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more input"))
        }
    }

    #[test]
    fn test_read_confirmed_first_try() {
        let mut out = Vec::new();
        let password = read_confirmed(scripted(&["secret", "secret"]), &mut out, 3).unwrap();

        assert_eq!(password.as_deref(), Some("secret"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_read_confirmed_retries_on_mismatch() {
        let mut out = Vec::new();
        let password =
            read_confirmed(scripted(&["secret", "typo", "secret", "secret"]), &mut out, 3).unwrap();

        assert_eq!(password.as_deref(), Some("secret"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Input did not match, please try again\n"
        );
    }

    #[test]
    fn test_read_confirmed_gives_up() {
        let mut out = Vec::new();
        let password = read_confirmed(scripted(&["a", "b", "c", "d"]), &mut out, 2).unwrap();

        assert_eq!(password, None);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Input did not match, please try again\n\
             Input did not match, please try again\n\
             Exceeded maximum number of input attempts\n"
        );
    }

    #[test]
    fn test_read_confirmed_propagates_read_errors() {
        let mut out = Vec::new();
        let err = read_confirmed(scripted(&["only-one"]), &mut out, 3).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_read_piped_strips_newline() {
        let mut input = io::Cursor::new("password\n");
        assert_eq!(read_piped(&mut input).unwrap().as_deref(), Some("password"));

        let mut input = io::Cursor::new("password\r\nignored\n");
        assert_eq!(read_piped(&mut input).unwrap().as_deref(), Some("password"));

        let mut input = io::Cursor::new("no-newline");
        assert_eq!(read_piped(&mut input).unwrap().as_deref(), Some("no-newline"));

        let mut input = io::Cursor::new("");
        assert_eq!(read_piped(&mut input).unwrap(), None);
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("yes\n"));
        assert!(is_yes("YES"));
        assert!(!is_yes("y"));
        assert!(!is_yes("no\n"));
        assert!(!is_yes(""));
    }
}
