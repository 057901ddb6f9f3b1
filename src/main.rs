mod config;
mod connection;
mod db;
mod loader;
mod logger;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::{LoadJob, DB};
use crate::logger::{error, info, init};

#[derive(Parser, Debug)]
#[command(name = "mailseed", about = "Bulk-load email addresses into a database table")]
struct Args {
    /// Path to the YAML config file (defaults to the app config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input file of newline-delimited email addresses (overrides the config)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize file logging under the app config directory
    if let Ok(dir) = config::app_config_dir() {
        let log_path = dir.join("mailseed.log");
        let _ = init(log_path);
    }

    let args = Args::parse();
    let result = run(&args);

    if let Err(err) = result {
        println!("{:?}", err);
        error(&format!("fatal error: {:?}", err));
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(input) = &args.input {
        config.input = input.clone();
    }

    let emails = loader::read_emails(&config.input)?;
    info(&format!(
        "read {} lines from {}",
        emails.len(),
        config.input.display()
    ));

    let job = LoadJob {
        emails,
        table: config.table.clone(),
        column: config.column.clone(),
    };
    let outcomes = DB::load_emails_for(&config.conn, &job)?;

    let inserted = outcomes.iter().filter(|o| o.is_inserted()).count();
    info(&format!(
        "run finished: {} inserted, {} failed",
        inserted,
        outcomes.len() - inserted
    ));

    Ok(())
}
