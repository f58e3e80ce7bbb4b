use super::prompt::{ask, read_content};
use super::render::{print_messages, render_selected, render_snippet_list, CmdMessage};
use super::setup::{init_logging, Cli, Commands};
use clap::Parser;
use log::{debug, warn};
use sni::api::SniApi;
use sni::clipboard::copy_to_clipboard;
use sni::config::{SniConfig, CONFIG_DIR_ENV};
use sni::error::Result;
use sni::model::{parse_tags, SnippetUpdate};
use sni::selector::Selector;
use sni::server::HttpServer;
use sni::shell::{confirm, run_shell};
use sni::store::fs::FileStore;
use std::io::{self, Write};
use std::sync::Arc;

struct AppContext {
    api: SniApi<FileStore>,
    config: SniConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    colored::control::set_override(cli.command.color());

    let ctx = init_context()?;

    match cli.command {
        Commands::New { name } => handle_new(&ctx, name),
        Commands::List { .. } => handle_list(&ctx),
        Commands::Search { keyword, .. } => handle_search(&ctx, &keyword),
        Commands::Use { name } => handle_use(&ctx, &name),
        Commands::Edit { name } => handle_edit(&ctx, &name),
        Commands::Rm { name, yes } => handle_rm(&ctx, &name, yes),
        Commands::Exec { tag, run, .. } => handle_exec(&ctx, tag.as_deref(), run),
        Commands::Configure => handle_configure(&ctx),
        Commands::Server { port, dev } => handle_server(ctx, port, dev),
    }
}

fn init_context() -> Result<AppContext> {
    let config = SniConfig::from_env()?;
    debug!("using storage {}", config.describe());
    let api = SniApi::new(FileStore::new(&config));
    Ok(AppContext { api, config })
}

fn handle_new(ctx: &AppContext, name: String) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let description = ask(&mut input, &mut output, "Description: ")?;
    let tags = ask(&mut input, &mut output, "Tags (comma separated): ")?;
    writeln!(output, "Command/Content (end with Ctrl+D on empty line):")?;
    let command = read_content(&mut input)?;

    let snippet = ctx
        .api
        .create_snippet_from_input(name, description, command, &tags)?;
    print_messages(&[CmdMessage::success(format!(
        "Snippet '{}' created successfully!",
        snippet.name
    ))]);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let snippets = ctx.api.list_snippets()?;
    if snippets.is_empty() {
        print_messages(&[CmdMessage::warning(
            "No snippets found. Create one with 'sni new <name>'",
        )]);
        return Ok(());
    }

    let header = format!("Found {} snippet(s):", snippets.len());
    print!("{}", render_snippet_list(&header, &snippets));
    Ok(())
}

fn handle_search(ctx: &AppContext, keyword: &str) -> Result<()> {
    let snippets = ctx.api.search_snippets(keyword)?;
    if snippets.is_empty() {
        print_messages(&[CmdMessage::warning(format!(
            "No snippets found for keyword: {}",
            keyword
        ))]);
        return Ok(());
    }

    let header = format!("Found {} snippet(s) for '{}':", snippets.len(), keyword);
    print!("{}", render_snippet_list(&header, &snippets));
    Ok(())
}

fn handle_use(ctx: &AppContext, name: &str) -> Result<()> {
    let snippet = ctx.api.get_snippet(name)?;
    print!("{}", snippet.command);
    io::stdout().flush()?;
    Ok(())
}

fn handle_edit(ctx: &AppContext, name: &str) -> Result<()> {
    let existing = ctx.api.get_snippet(name)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let description = ask(
        &mut input,
        &mut output,
        &format!("Description [{}]: ", existing.description),
    )?;
    let tags = ask(
        &mut input,
        &mut output,
        &format!("Tags [{}]: ", existing.tags.join(", ")),
    )?;
    writeln!(
        output,
        "Command/Content (current content shown, edit and end with Ctrl+D):"
    )?;
    writeln!(output, "--- Current Content ---")?;
    writeln!(output, "{}", existing.command)?;
    writeln!(output, "--- Enter New Content ---")?;
    let command = read_content(&mut input)?;

    // Blank answers keep the current values.
    let mut update = SnippetUpdate::new().description(description).command(command);
    if !tags.is_empty() {
        update = update.tags(parse_tags(&tags));
    }

    ctx.api.update_snippet(name, update)?;
    print_messages(&[CmdMessage::success(format!(
        "Snippet '{}' updated successfully!",
        name
    ))]);
    Ok(())
}

fn handle_rm(ctx: &AppContext, name: &str, yes: bool) -> Result<()> {
    // Fail on unknown names before asking anything.
    ctx.api.get_snippet(name)?;

    if !yes {
        let stdin = io::stdin();
        let question = format!("Are you sure you want to delete snippet '{}'?", name);
        if !confirm(&mut stdin.lock(), &mut io::stdout(), &question)? {
            print_messages(&[CmdMessage::info("Deletion cancelled.")]);
            return Ok(());
        }
    }

    ctx.api.delete_snippet(name)?;
    print_messages(&[CmdMessage::success(format!(
        "Snippet '{}' deleted successfully!",
        name
    ))]);
    Ok(())
}

fn handle_exec(ctx: &AppContext, filter: Option<&str>, run: bool) -> Result<()> {
    let candidates = ctx.api.candidates(filter)?;
    if candidates.is_empty() {
        print_messages(&[CmdMessage::warning("No snippets found.")]);
        return Ok(());
    }

    let selector = Selector::detect();
    let prompt = if run {
        "Select a snippet to execute:"
    } else {
        "Select a snippet to copy:"
    };
    let snippet = match selector.select(&candidates, prompt)? {
        Some(snippet) => snippet,
        None => {
            debug!("selection cancelled");
            return Ok(());
        }
    };

    print!("{}", render_selected(&snippet));

    if run {
        let stdin = io::stdin();
        println!();
        if !confirm(&mut stdin.lock(), &mut io::stdout(), "Execute this command?")? {
            print_messages(&[CmdMessage::info("Execution cancelled.")]);
            return Ok(());
        }
        let outcome = run_shell(&snippet.command)?;
        if outcome.success {
            print_messages(&[CmdMessage::success("Command finished.")]);
        } else {
            let code = outcome
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "a signal".to_string());
            print_messages(&[CmdMessage::warning(format!("Command exited with {}", code))]);
        }
        return Ok(());
    }

    match copy_to_clipboard(&snippet.command) {
        Ok(()) => print_messages(&[CmdMessage::success(
            "Command copied to clipboard! Paste it in your terminal.",
        )]),
        Err(e) => {
            warn!("clipboard copy failed: {}", e);
            println!();
            print_messages(&[CmdMessage::warning(
                "Could not copy to clipboard. Here's the command:",
            )]);
            println!("{}", snippet.command);
        }
    }
    Ok(())
}

fn handle_configure(ctx: &AppContext) -> Result<()> {
    println!("🔧 sni Configuration");
    println!();
    println!("Configuration is managed through environment variables:");
    println!();
    println!("📁 {:<18} - Custom config directory", CONFIG_DIR_ENV);
    println!("   Current: {}", ctx.config.describe());
    println!("   Snippets file: {}", ctx.config.snippet_file.display());
    println!();
    println!("Example usage:");
    println!("  export {}=\"/path/to/config\"", CONFIG_DIR_ENV);
    println!("  sni list");
    println!();
    println!("🌐 Server settings:");
    println!(
        "  sni server --port 9090         # Custom port (default {})",
        ctx.config.server_port
    );
    println!("  sni server --dev               # Development mode");
    println!();
    Ok(())
}

fn handle_server(ctx: AppContext, port: u16, dev: bool) -> Result<()> {
    let config = ctx.config.with_server_port(port);
    let server = HttpServer::bind(&format!("127.0.0.1:{}", config.server_port), dev)?;

    println!(
        "🚀 Server starting on http://localhost:{}",
        config.server_port
    );
    if dev {
        println!(
            "📝 Development mode: non-API requests are redirected to {}",
            sni::server::DEV_FRONTEND_URL
        );
    }

    server.serve(Arc::new(ctx.api))
}
