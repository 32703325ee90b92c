//! A reader for OLLIR, the textual form of the intermediate representation.

pub mod lex;
pub mod parse;

use jmm_common::ir::ClassUnit;
use jmm_common::message::{File, Messages};
use jmm_common::{Driver, IrOutput};

use lex::Token;

/// Read a class from its OLLIR source. Problems are reported to the driver,
/// and `None` is returned if the text could not be read in full.
pub fn read(driver: &mut impl Driver, src: impl AsRef<str>, file: File) -> Option<ClassUnit> {
    let tokens = lex::lex(driver, src, file);
    let invalid = tokens.iter().any(|(tok, _)| *tok == Token::Invalid);

    let mut errors = Errors { inner: driver, any: false };
    let class = parse::parse(&mut errors, tokens, file);

    if invalid || errors.any {
        None
    } else {
        class
    }
}

/// Passes everything on, while noting whether any errors were reported.
struct Errors<'a, D> {
    inner: &'a mut D,
    any: bool,
}

impl<D: Driver> Driver for Errors<'_, D> {
    fn report(&mut self, messages: Messages) {
        self.any |= messages.has_errors();
        self.inner.report(messages);
    }

    fn output_ir(&mut self, at: IrOutput, data: impl FnOnce() -> String) {
        self.inner.output_ir(at, data);
    }
}
