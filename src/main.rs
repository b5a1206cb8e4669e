use clap::Parser;

use macrolab::api::{self, Cli};

#[tokio::main]
async fn main() {
    if let Err(e) = api::run(Cli::parse()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
