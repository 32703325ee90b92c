use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jmm_common::IrOutput;
use jmm_midend::RegisterBudget;

/// compile OLLIR classes to Jasmin assembly.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
#[command(propagate_version = true)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Command,
}

impl Arguments {
    pub fn options(&self) -> &Options {
        self.command.options()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile the class and write its Jasmin listing.
    #[command(visible_alias = "b")]
    Build(Options),

    /// Compile the class without writing anything.
    #[command(visible_alias = "c")]
    Check(Options),
}

impl Command {
    pub fn options(&self) -> &Options {
        match self {
            Self::Build(opts) => opts,
            Self::Check(opts) => opts,
        }
    }

    pub fn build(&self) -> bool {
        matches!(self, Self::Build(_))
    }
}

#[derive(Debug, Args)]
pub struct Options {
    /// Registers available to each method: `off` (or -1) skips allocation, 0
    /// keeps the registers as declared, `auto` uses as many as needed.
    #[arg(short, long, default_value = "off", allow_negative_numbers = true)]
    pub registers: RegisterBudget,

    /// Where to write the listing. Defaults to `<Class>.j` next to the input.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print an intermediate result.
    #[arg(long, value_enum)]
    pub dump: Vec<Dump>,

    /// Write the interference graphs of every method to a GraphViz file.
    #[arg(long)]
    pub interference_dot: Option<PathBuf>,

    #[arg(required = true)]
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Dump {
    Liveness,
    Interference,
}

impl From<Dump> for IrOutput {
    fn from(dump: Dump) -> Self {
        match dump {
            Dump::Liveness => IrOutput::Liveness,
            Dump::Interference => IrOutput::Interference,
        }
    }
}
