mod source;

mod alloc;
mod emit;
mod parse;

pub use source::{File, Span};

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

#[derive(Debug, Default)]
pub struct Messages {
    pub msgs: Vec<Diagnostic<File>>,
}

impl Messages {
    pub fn new() -> Self {
        Self { msgs: Vec::new() }
    }

    /// Add a message pointing at some place in the source.
    #[must_use]
    pub fn at(&mut self, span: Span) -> MessageAdder {
        MessageAdder {
            msgs: self,
            at: Some(span),
        }
    }

    /// Add a message about something with no meaningful source location, such
    /// as a whole method during code generation.
    #[must_use]
    pub fn anywhere(&mut self) -> MessageAdder {
        MessageAdder {
            msgs: self,
            at: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.msgs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.msgs.len()
    }

    pub fn has_errors(&self) -> bool {
        self.msgs
            .iter()
            .any(|msg| matches!(msg.severity, Severity::Error | Severity::Bug))
    }

    pub fn merge(&mut self, other: Messages) {
        self.msgs.extend(other.msgs);
    }
}

#[derive(Debug)]
pub struct MessageAdder<'a> {
    msgs: &'a mut Messages,
    at: Option<Span>,
}

impl<'a> MessageAdder<'a> {
    fn add(&mut self, diag: Diagnostic<File>) {
        self.msgs.msgs.push(diag);
    }

    fn primary(&self) -> Vec<Label<File>> {
        self.at
            .map(|span| Label::primary(span.file, span))
            .into_iter()
            .collect()
    }
}
