//! Agent Starter - generate AI agent projects from the command line

use clap::Parser;
use starter_cli::cli::Cli;
use starter_cli::output::{OutputContext, json};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let (json_output, no_color) = (cli.json, cli.no_color);
    if let Err(e) = cli.run().await {
        let message = format!("{e:#}");
        match json::format_error(&message, json::error_code(&e)) {
            Ok(obj) if json_output => println!("{obj}"),
            _ => OutputContext::new(no_color, false).error(&format!("Error: {message}")),
        }
        std::process::exit(1);
    }
}
