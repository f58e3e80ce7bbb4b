use colored::Colorize;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", format!("❌ Error: {}", e).red());
        std::process::exit(1);
    }
}
