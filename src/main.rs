mod args;
mod cli;
mod console_driver;
mod input;
mod output;

use clap::Parser;
use env_logger::Env;

use args::Arguments;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Arguments::parse();
    if !cli::run(&args)? {
        std::process::exit(1);
    }

    Ok(())
}
