use crate::error::{Result, SniError};
use log::debug;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Copies text to the system clipboard in an OS-specific way.
/// - macOS: uses pbcopy
/// - Linux: uses xclip, falling back to xsel
/// - Windows: uses clip.exe
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let tools = CLIPBOARD_TOOLS;
    for &(program, args) in tools {
        match pipe_to(program, args, text) {
            Err(SniError::ToolUnavailable(_)) => {
                debug!("{} is not installed, trying next clipboard tool", program);
                continue;
            }
            other => return other,
        }
    }

    Err(SniError::ToolUnavailable(match tools {
        [] => "clipboard is not supported on this platform".to_string(),
        _ => format!(
            "no clipboard utility found (install one of: {})",
            tools
                .iter()
                .map(|(program, _)| *program)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }))
}

type Tool = (&'static str, &'static [&'static str]);

#[cfg(target_os = "macos")]
const CLIPBOARD_TOOLS: &[Tool] = &[("pbcopy", &[])];

#[cfg(target_os = "windows")]
const CLIPBOARD_TOOLS: &[Tool] = &[("clip", &[])];

#[cfg(target_os = "linux")]
const CLIPBOARD_TOOLS: &[Tool] = &[
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CLIPBOARD_TOOLS: &[Tool] = &[];

/// Spawns `program` and writes `text` to its stdin. A program that cannot be
/// found is reported as `ToolUnavailable`.
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        // xclip keeps running to serve the selection; don't hold our pipes open.
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => SniError::ToolUnavailable(program.to_string()),
            _ => SniError::Io(e),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        debug!("copied {} bytes with {}", text.len(), program);
        Ok(())
    } else {
        Err(SniError::Io(std::io::Error::other(format!(
            "{} exited with {}",
            program, status
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_unavailable() {
        let err = pipe_to("sni-definitely-not-a-real-tool", &[], "x").unwrap_err();
        assert!(matches!(err, SniError::ToolUnavailable(name) if name == "sni-definitely-not-a-real-tool"));
    }

    #[cfg(unix)]
    #[test]
    fn pipes_text_to_program() {
        assert!(pipe_to("cat", &[], "echo hi").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_is_io_error() {
        assert!(matches!(pipe_to("false", &[], ""), Err(SniError::Io(_))));
    }
}
