use codespan_reporting::diagnostic::Severity;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codespan_reporting::term::{self, Config, DisplayStyle};
use console::style;
use jmm_common::message::Messages;
use jmm_common::{Driver, IrOutput};
use log::error;

pub struct ConsoleDriver {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: Config,
    dumps: Vec<IrOutput>,
    errors: usize,
    warnings: usize,
}

impl ConsoleDriver {
    pub fn new(files: SimpleFiles<String, String>, dumps: Vec<IrOutput>) -> Self {
        Self {
            files,
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: Config {
                display_style: DisplayStyle::Rich,
                ..Default::default()
            },
            dumps,
            errors: 0,
            warnings: 0,
        }
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

impl Driver for ConsoleDriver {
    fn report(&mut self, messages: Messages) {
        for msg in messages.msgs {
            match msg.severity {
                Severity::Bug | Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
                Severity::Note | Severity::Help => {}
            }

            if let Err(err) = term::emit(&mut self.writer, &self.config, &self.files, &msg) {
                error!("could not print a diagnostic: {err}");
            }
        }
    }

    fn output_ir(&mut self, at: IrOutput, data: impl FnOnce() -> String) {
        if !self.dumps.contains(&at) {
            return;
        }

        let name = match at {
            IrOutput::Liveness => "liveness",
            IrOutput::Interference => "interference",
        };

        println!("{}", style(format!("== {name} ==")).cyan().bold());
        println!("{}", data());
    }
}
