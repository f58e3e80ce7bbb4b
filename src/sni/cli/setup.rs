use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use sni::config::DEFAULT_SERVER_PORT;

#[derive(Parser, Debug)]
#[command(name = "sni", bin_name = "sni", version)]
#[command(
    about = "Snippet management tool",
    long_about = "sni is a CLI tool for managing code snippets, commands, and configuration files.\n\
                  It provides both a command-line interface and a local JSON API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new snippet
    New {
        /// Snippet name
        name: String,
    },

    /// List all snippets
    #[command(alias = "ls")]
    List {
        /// Enable colorized output
        #[arg(long)]
        color: bool,
    },

    /// Search snippets by keyword
    Search {
        keyword: String,

        /// Enable colorized output
        #[arg(long)]
        color: bool,
    },

    /// Output snippet content to terminal
    Use { name: String },

    /// Edit an existing snippet
    Edit { name: String },

    /// Remove a snippet
    Rm {
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Select a snippet interactively, then copy it (or run it with --run)
    Exec {
        /// Only offer snippets matching this keyword
        #[arg(short, long)]
        tag: Option<String>,

        /// Enable colorized output
        #[arg(long)]
        color: bool,

        /// Execute the snippet in the shell after confirmation
        #[arg(long)]
        run: bool,
    },

    /// Show where snippets are stored and how to change it
    Configure,

    /// Start the local JSON API server
    Server {
        /// Port to run server on
        #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT)]
        port: u16,

        /// Redirect non-API requests to the frontend dev server
        #[arg(short, long)]
        dev: bool,
    },
}

impl Commands {
    pub fn color(&self) -> bool {
        match self {
            Commands::List { color } | Commands::Search { color, .. } | Commands::Exec { color, .. } => {
                *color
            }
            _ => false,
        }
    }
}

/// `warn` by default, `debug` with `--verbose`. `RUST_LOG` still wins.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sni").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_exec_flags() {
        let cli = parse(&["exec", "-t", "git", "--color", "--run"]);
        match cli.command {
            Commands::Exec { ref tag, color, run } => {
                assert_eq!(tag.as_deref(), Some("git"));
                assert!(color);
                assert!(run);
            }
            ref other => panic!("unexpected command {:?}", other),
        }
        assert!(cli.command.color());
    }

    #[test]
    fn server_defaults_to_8080() {
        match parse(&["server"]).command {
            Commands::Server { port, dev } => {
                assert_eq!(port, 8080);
                assert!(!dev);
            }
            other => panic!("unexpected command {:?}", other),
        }
        match parse(&["server", "-p", "9090", "-d"]).command {
            Commands::Server { port, dev } => {
                assert_eq!(port, 9090);
                assert!(dev);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = parse(&["list", "--verbose"]);
        assert!(cli.verbose);
        assert!(!cli.command.color());
    }

    #[test]
    fn rm_requires_a_name() {
        assert!(Cli::try_parse_from(["sni", "rm"]).is_err());
        match parse(&["rm", "x", "-y"]).command {
            Commands::Rm { name, yes } => {
                assert_eq!(name, "x");
                assert!(yes);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
