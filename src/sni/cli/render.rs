//! Terminal rendering. Everything here builds strings; printing happens in
//! the handlers. Colors follow `colored`'s global override, which the CLI
//! sets from the `--color` flag.

use chrono::{DateTime, Utc};
use colored::Colorize;
use sni::model::Snippet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const INDENT: &str = "   ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn render(&self) -> String {
        match self.level {
            MessageLevel::Info => format!("ℹ️  {}", self.content).cyan().to_string(),
            MessageLevel::Success => format!("✅ {}", self.content).green().to_string(),
            MessageLevel::Warning => format!("⚠️  {}", self.content).yellow().to_string(),
        }
    }
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", message.render());
    }
}

pub fn title(text: &str) -> String {
    format!("📝 {}", text).cyan().bold().to_string()
}

/// Header plus one block per snippet, as shown by `list` and `search`.
pub fn render_snippet_list(header: &str, snippets: &[Snippet]) -> String {
    let mut out = format!("{}\n\n", title(header));
    for snippet in snippets {
        out.push_str(&render_snippet(snippet));
        out.push('\n');
    }
    out
}

fn render_snippet(snippet: &Snippet) -> String {
    let mut out = format!("{}\n", format!("🔹 {}", snippet.name).green().bold());
    if !snippet.description.is_empty() {
        out.push_str(&format!("{}Description: {}\n", INDENT, snippet.description));
    }
    if !snippet.tags.is_empty() {
        out.push_str(&format!("{}{}\n", INDENT, render_tags(&snippet.tags)));
    }
    let preview = truncate_to_width(
        &snippet.command.replace('\n', " "),
        LINE_WIDTH - INDENT.width() - "Command: ".width(),
    );
    out.push_str(&format!(
        "{}{}\n",
        INDENT,
        format!("Command: {}", preview).bright_black()
    ));
    out.push_str(&format!(
        "{}{}\n",
        INDENT,
        format!("Updated: {}", format_time_ago(snippet.updated_at)).dimmed()
    ));
    out
}

fn render_tags(tags: &[String]) -> String {
    let tags: Vec<String> = tags
        .iter()
        .map(|tag| format!("#{}", tag).blue().to_string())
        .collect();
    format!("Tags: {}", tags.join(" "))
}

/// What `exec` shows once a snippet is chosen.
pub fn render_selected(snippet: &Snippet) -> String {
    let mut out = format!("\n{}\n", format!("📋 Selected: {}", snippet.name).cyan());
    if !snippet.description.is_empty() {
        out.push_str(&format!("{}Description: {}\n", INDENT, snippet.description));
    }
    out.push_str(&format!(
        "{}\n",
        format!("Command: {}", snippet.command).bright_black()
    ));
    out
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
