use std::process::ExitCode;

use clap::Parser;
use hyde_cli::{Args, app, report};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the report; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match app::run(&args).await {
        Ok(result) if args.json => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("{}", report::render_error(&e.into()));
                ExitCode::FAILURE
            }
        },
        Ok(result) => {
            print!("{}", report::render(&args.query, &result));
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", report::render_error(&e));
            ExitCode::FAILURE
        }
    }
}
