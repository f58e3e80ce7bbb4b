use crate::error::Result;
use log::{debug, warn};
use std::io::{BufRead, Write};
use std::process::{Command, ExitStatus};

/// How a shell-executed snippet finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOutcome {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
}

impl From<ExitStatus> for ShellOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
            success: status.success(),
        }
    }
}

/// Asks a yes/no question. Only `y` or `yes` (any case) count as yes; EOF is no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    write!(output, "{} (y/N): ", question)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Runs the whole snippet body through the user's shell, attached to the
/// terminal. A non-zero exit is returned, not raised.
pub fn run_shell(command: &str) -> Result<ShellOutcome> {
    run_command(shell_command(command))
}

fn run_command(mut cmd: Command) -> Result<ShellOutcome> {
    debug!("running snippet via {:?}", cmd.get_program());

    let outcome = ShellOutcome::from(cmd.status()?);
    if !outcome.success {
        warn!("snippet exited with {:?}", outcome.code);
    }
    Ok(outcome)
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let shell = std::env::var("SHELL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "/bin/sh".to_string());
    posix_command(&shell, command)
}

#[cfg(not(windows))]
fn posix_command(shell: &str, command: &str) -> Command {
    let mut cmd = Command::new(shell);
    cmd.args(["-c", command]);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answer: &str) -> (bool, String) {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut output = Vec::new();
        let yes = confirm(&mut input, &mut output, "Run it?").unwrap();
        (yes, String::from_utf8(output).unwrap())
    }

    #[test]
    fn confirm_accepts_y_and_yes() {
        assert!(ask("y\n").0);
        assert!(ask(" YES \n").0);
        let (_, prompt) = ask("y\n");
        assert_eq!(prompt, "Run it? (y/N): ");
    }

    #[test]
    fn confirm_rejects_everything_else() {
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("").0);
        assert!(!ask("yep\n").0);
    }

    #[cfg(unix)]
    #[test]
    fn reports_exit_codes() {
        let ok = run_command(posix_command("/bin/sh", "true")).unwrap();
        assert!(ok.success);
        assert_eq!(ok.code, Some(0));

        let failed = run_command(posix_command("/bin/sh", "exit 3")).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn runs_multi_line_bodies() {
        let outcome = run_command(posix_command("/bin/sh", "x=1\ntest \"$x\" = 1")).unwrap();
        assert!(outcome.success);
    }
}
