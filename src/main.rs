mod app;

use clap::Parser;

use app::{run_app, Cli};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run_app(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
