//! # CLI Layer
//!
//! One client of the sni library. This is the only place that:
//! - knows about stdin/stdout/stderr
//! - parses arguments (clap)
//! - formats output for humans (colors, relative times)
//!
//! ## Structure
//!
//! - `setup`: clap definitions and logger setup
//! - `commands`: `run()` plus one `handle_*` per subcommand
//! - `prompt`: interactive line and multi-line input
//! - `render`: string builders for terminal output

mod commands;
mod prompt;
mod render;
mod setup;

pub use commands::run;
