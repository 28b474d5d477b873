//! memegen - imgflip meme templates from the command line
//!
//! Lists meme templates, looks one up by short name, or captions it through
//! the imgflip API.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use memegen::app::{App, AppError};
use memegen::cli::{Cli, Invocation};
use memegen::config::Config;

async fn run(cli: &Cli) -> Result<(), AppError> {
    let config = Config::from_cli(cli);
    let app = App::new(&config)?;
    let invocation = Invocation::from_args(&cli.args);

    let mut stdout = io::stdout();
    app.run(&invocation, &mut stdout).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
