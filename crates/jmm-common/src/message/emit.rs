use codespan_reporting::diagnostic::Diagnostic;

use super::MessageAdder;

const METHOD_FAILED: &str = "EE00";

impl<'a> MessageAdder<'a> {
    pub fn emit_method_failed(&mut self, method: &str, reason: impl ToString) {
        let labels = self.primary();
        let notes = vec![reason.to_string()];

        self.add(
            Diagnostic::error()
                .with_code(METHOD_FAILED)
                .with_message(format!("could not generate code for `{method}`"))
                .with_labels(labels)
                .with_notes(notes),
        );
    }
}
