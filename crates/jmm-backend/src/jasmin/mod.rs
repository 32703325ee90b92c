//! Jasmin assembly generation. Every method body is lowered into a list of
//! typed [`repr::Item`]s, whose fixed stack effects give the `.limit stack` of
//! the method, and the whole class is then written out as text.

pub mod repr;

mod frame;
mod lower;
mod names;

#[cfg(test)]
mod tests;

pub use self::frame::{max_stack, Frame};
pub use self::lower::lower;
pub use self::names::Names;

use jmm_common::ir::ClassUnit;
use jmm_common::message::Messages;
use jmm_common::Driver;
use log::{info, trace};
use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EmitError {
    #[error("the variable `{0}` has no register and is not a field of the class")]
    Unresolved(String),

    #[error("no instruction has the label `{0}`")]
    UnknownLabel(String),

    #[error("`{0}` pops more values than there are on the stack")]
    StackUnderflow(String),

    #[error("the literal `{literal}` cannot have the type `{ty}`")]
    LiteralType { literal: String, ty: String },

    #[error("`{0}` does not produce a value")]
    NotAValue(String),

    #[error("the method can reach its end without returning a value")]
    MissingReturn,

    #[error("`{0}` is not supported")]
    Unsupported(String),
}

/// Every method of a class that could not be emitted.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("could not generate code for {} method(s) of `{class}`", .failures.len())]
pub struct ClassEmitError {
    pub class: String,
    pub failures: Vec<(String, EmitError)>,
}

/// Produce the Jasmin listing of a class.
pub fn emit(class: &ClassUnit) -> Result<String, ClassEmitError> {
    lower(class).map(|class| class.to_string())
}

/// Like [`emit`], but failures are reported to the driver as diagnostics.
pub fn generate(driver: &mut impl Driver, class: &ClassUnit) -> Option<String> {
    info!("beginning jasmin generation for `{}`", class.name);

    let res = match emit(class) {
        Ok(code) => Some(code),
        Err(err) => {
            let mut msgs = Messages::new();
            for (method, reason) in err.failures.iter() {
                msgs.anywhere().emit_method_failed(method, reason);
            }

            driver.report(msgs);
            None
        }
    };

    trace!("done generating jasmin for `{}`", class.name);
    res
}
