use codespan_reporting::diagnostic::Diagnostic;

use super::MessageAdder;

const INVALID_TOKEN: &str = "EP00";
const UNEXPECTED: &str = "EP01";
const LITERAL_RANGE: &str = "EP02";
const UNKNOWN_INVOCATION: &str = "EP03";
const UNKNOWN_LABEL: &str = "EP04";
const DUPLICATE_LABEL: &str = "EP05";
const DANGLING_LABEL: &str = "EP06";

impl<'a> MessageAdder<'a> {
    pub fn parse_invalid_token(&mut self) {
        let labels = self.primary();

        self.add(
            Diagnostic::error()
                .with_code(INVALID_TOKEN)
                .with_message("invalid token")
                .with_labels(labels),
        );
    }

    pub fn parse_expected(&mut self, expected: &str, found: &str) {
        let labels = self
            .primary()
            .into_iter()
            .map(|label| label.with_message(format!("expected {expected}")))
            .collect();

        self.add(
            Diagnostic::error()
                .with_code(UNEXPECTED)
                .with_message(format!("expected {expected}, found {found}"))
                .with_labels(labels),
        );
    }

    pub fn parse_literal_out_of_range(&mut self, literal: &str) {
        let labels = self.primary();
        let notes = vec![String::from(
            "integer literals must fit in a signed 32-bit integer",
        )];

        self.add(
            Diagnostic::error()
                .with_code(LITERAL_RANGE)
                .with_message(format!("integer literal `{literal}` is out of range"))
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_unknown_invocation(&mut self, name: &str) {
        let labels = self.primary();
        let notes = vec![String::from(
            "expected one of `invokevirtual`, `invokestatic`, `invokespecial`, `new` or `arraylength`",
        )];

        self.add(
            Diagnostic::error()
                .with_code(UNKNOWN_INVOCATION)
                .with_message(format!("unknown invocation `{name}`"))
                .with_labels(labels)
                .with_notes(notes),
        );
    }

    pub fn parse_unknown_label(&mut self, method: &str, label: &str) {
        let labels = self.primary();

        self.add(
            Diagnostic::error()
                .with_code(UNKNOWN_LABEL)
                .with_message(format!("jump to undefined label `{label}` in `{method}`"))
                .with_labels(labels),
        );
    }

    pub fn parse_duplicate_label(&mut self, method: &str, label: &str) {
        let labels = self.primary();

        self.add(
            Diagnostic::error()
                .with_code(DUPLICATE_LABEL)
                .with_message(format!("label `{label}` is defined twice in `{method}`"))
                .with_labels(labels),
        );
    }

    pub fn parse_dangling_label(&mut self, method: &str, label: &str) {
        let labels = self.primary();
        let notes = vec![String::from(
            "every label must be followed by an instruction in the same method",
        )];

        self.add(
            Diagnostic::error()
                .with_code(DANGLING_LABEL)
                .with_message(format!("label `{label}` ends the body of `{method}`"))
                .with_labels(labels)
                .with_notes(notes),
        );
    }
}
