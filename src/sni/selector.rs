//! Choosing one snippet out of many.
//!
//! [`Selector::detect`] picks a strategy once: the external `fzf` fuzzy
//! finder when it can be spawned, otherwise a numbered menu on the terminal.
//! Setting `SNI_NO_FZF` forces the numbered menu.
//!
//! Both strategies return `Ok(None)` when the user cancels.

use crate::error::{Result, SniError};
use crate::model::Snippet;
use log::debug;
use std::env;
use std::io::{self, BufRead, Write};
use std::process::{Command, Stdio};

pub const NO_FZF_ENV: &str = "SNI_NO_FZF";

const PREVIEW_CHARS: usize = 100;

pub enum Selector {
    Fuzzy(FuzzySelector),
    Numbered(NumberedSelector),
}

impl Selector {
    pub fn detect() -> Self {
        if env::var_os(NO_FZF_ENV).is_some() {
            debug!("{} is set, using numbered selection", NO_FZF_ENV);
            return Selector::Numbered(NumberedSelector);
        }
        if has_fzf() {
            debug!("fzf found, using fuzzy selection");
            Selector::Fuzzy(FuzzySelector::default())
        } else {
            debug!("fzf not found, using numbered selection");
            Selector::Numbered(NumberedSelector)
        }
    }

    pub fn select(&self, candidates: &[Snippet], prompt: &str) -> Result<Option<Snippet>> {
        match self {
            Selector::Fuzzy(fuzzy) => fuzzy.select(candidates, prompt),
            Selector::Numbered(numbered) => {
                let stdin = io::stdin();
                let stdout = io::stdout();
                numbered.select(candidates, prompt, &mut stdin.lock(), &mut stdout.lock())
            }
        }
    }
}

fn has_fzf() -> bool {
    Command::new("fzf")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Runs an external fuzzy finder over `"{index}: {name} - {description}"` lines.
pub struct FuzzySelector {
    program: String,
    args: Vec<String>,
    prompt_arg: bool,
}

impl Default for FuzzySelector {
    fn default() -> Self {
        Self {
            program: "fzf".to_string(),
            args: vec![
                "--height=40%".to_string(),
                "--layout=reverse".to_string(),
                "--border".to_string(),
            ],
            prompt_arg: true,
        }
    }
}

impl FuzzySelector {
    /// A finder other than fzf. It receives the candidate lines on stdin and
    /// must print the chosen line; no `--prompt` is passed.
    pub fn with_command(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            prompt_arg: false,
        }
    }

    pub fn select(&self, candidates: &[Snippet], prompt: &str) -> Result<Option<Snippet>> {
        if candidates.is_empty() {
            return Err(SniError::NoCandidates);
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if self.prompt_arg {
            cmd.arg(format!("--prompt={} ", prompt.trim_end()));
        }
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| SniError::ToolUnavailable(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // The finder may exit before reading everything.
            if let Err(e) = stdin.write_all(format_fuzzy_lines(candidates).as_bytes()) {
                if e.kind() != io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            debug!("{} exited with {}, treating as cancel", self.program, output.status);
            return Ok(None);
        }

        let chosen = String::from_utf8_lossy(&output.stdout);
        parse_fuzzy_choice(&chosen, candidates)
    }
}

/// One line per candidate, 0-based index first.
pub fn format_fuzzy_lines(candidates: &[Snippet]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, snippet)| {
            if snippet.description.is_empty() {
                format!("{}: {}\n", i, snippet.name)
            } else {
                format!("{}: {} - {}\n", i, snippet.name, snippet.description)
            }
        })
        .collect()
}

/// Maps the finder's output line back to a candidate. Blank output is a cancel.
pub fn parse_fuzzy_choice(line: &str, candidates: &[Snippet]) -> Result<Option<Snippet>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let index = line.split(':').next().unwrap_or_default().trim();
    index
        .parse::<usize>()
        .ok()
        .and_then(|i| candidates.get(i))
        .cloned()
        .map(Some)
        .ok_or_else(|| SniError::InvalidSelection(line.to_string()))
}

/// Numbered menu read from a line of input.
pub struct NumberedSelector;

impl NumberedSelector {
    pub fn select<R: BufRead, W: Write>(
        &self,
        candidates: &[Snippet],
        prompt: &str,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Snippet>> {
        if candidates.is_empty() {
            return Err(SniError::NoCandidates);
        }

        writeln!(output, "{}", prompt)?;
        writeln!(output)?;
        for (i, snippet) in candidates.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, snippet.name)?;
            if !snippet.description.is_empty() {
                writeln!(output, "   Description: {}", snippet.description)?;
            }
            if !snippet.tags.is_empty() {
                writeln!(output, "   Tags: {}", snippet.tags.join(", "))?;
            }
            writeln!(output, "   Command: {}", command_preview(&snippet.command))?;
            writeln!(output)?;
        }
        write!(output, "Enter number (or 'q' to quit): ")?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        let answer = line.trim();

        if answer == "q" || answer == "quit" {
            return Ok(None);
        }

        answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=candidates.len()).contains(n))
            .map(|n| Some(candidates[n - 1].clone()))
            .ok_or_else(|| SniError::InvalidSelection(answer.to_string()))
    }
}

fn command_preview(command: &str) -> String {
    let flat = command.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn candidates() -> Vec<Snippet> {
        vec![
            Snippet::new("build".into(), "".into(), "cargo build".into(), vec![]),
            Snippet::new(
                "deploy".into(),
                "ship it".into(),
                "make\ndeploy".into(),
                vec!["ops".into(), "prod".into()],
            ),
            Snippet::new("logs".into(), "".into(), "tail -f log".into(), vec![]),
        ]
    }

    fn numbered(input: &str) -> (Result<Option<Snippet>>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = NumberedSelector.select(&candidates(), "Pick one", &mut reader, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn numbered_picks_by_position() {
        let (result, out) = numbered("2\n");
        assert_eq!(result.unwrap().unwrap().name, "deploy");
        assert!(out.starts_with("Pick one\n\n1. build\n"));
        assert!(out.contains("2. deploy\n   Description: ship it\n   Tags: ops, prod\n   Command: make deploy\n"));
        assert!(out.ends_with("Enter number (or 'q' to quit): "));
    }

    #[test]
    fn numbered_quit_is_none() {
        assert!(numbered("q\n").0.unwrap().is_none());
        assert!(numbered(" quit \n").0.unwrap().is_none());
    }

    #[test]
    fn numbered_out_of_range_is_invalid() {
        assert!(matches!(
            numbered("9\n").0,
            Err(SniError::InvalidSelection(input)) if input == "9"
        ));
        assert!(matches!(numbered("0\n").0, Err(SniError::InvalidSelection(_))));
        assert!(matches!(numbered("").0, Err(SniError::InvalidSelection(_))));
    }

    #[test]
    fn empty_candidates_error() {
        let mut reader = Cursor::new(Vec::new());
        let mut out = Vec::new();
        assert!(matches!(
            NumberedSelector.select(&[], "Pick", &mut reader, &mut out),
            Err(SniError::NoCandidates)
        ));
        assert!(matches!(
            FuzzySelector::default().select(&[], "Pick"),
            Err(SniError::NoCandidates)
        ));
    }

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(command_preview("a\nb"), "a b");
        let long = "x".repeat(120);
        let preview = command_preview(&long);
        assert_eq!(preview, format!("{}...", "x".repeat(100)));
        assert_eq!(command_preview(&"y".repeat(100)), "y".repeat(100));
    }

    #[test]
    fn fuzzy_lines_include_description_when_present() {
        assert_eq!(
            format_fuzzy_lines(&candidates()),
            "0: build\n1: deploy - ship it\n2: logs\n"
        );
    }

    #[test]
    fn fuzzy_choice_parses_leading_index() {
        let c = candidates();
        assert_eq!(
            parse_fuzzy_choice("1: deploy - ship it\n", &c).unwrap().unwrap().name,
            "deploy"
        );
        assert!(parse_fuzzy_choice("  \n", &c).unwrap().is_none());
        assert!(matches!(
            parse_fuzzy_choice("7: gone", &c),
            Err(SniError::InvalidSelection(_))
        ));
        assert!(matches!(
            parse_fuzzy_choice("deploy", &c),
            Err(SniError::InvalidSelection(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn fuzzy_uses_finder_output() {
        let finder = FuzzySelector::with_command("tail", &["-n", "1"]);
        let chosen = finder.select(&candidates(), "Pick").unwrap().unwrap();
        assert_eq!(chosen.name, "logs");
    }

    #[cfg(unix)]
    #[test]
    fn fuzzy_failure_is_cancel() {
        let finder = FuzzySelector::with_command("false", &[]);
        assert!(finder.select(&candidates(), "Pick").unwrap().is_none());
    }
}
