use sni::error::Result;
use std::io::{BufRead, Read, Write};

/// Prints `label`, reads one line, and returns it trimmed. EOF reads as empty.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Reads everything up to EOF (Ctrl+D) and trims it.
pub fn read_content<R: BufRead>(input: &mut R) -> Result<String> {
    let mut content = String::new();
    input.read_to_string(&mut content)?;
    Ok(content.trim().to_string())
}
