use std::fmt;

use codespan_reporting::diagnostic::Diagnostic;

use super::MessageAdder;

const INFEASIBLE: &str = "WA00";

impl<'a> MessageAdder<'a> {
    pub fn alloc_infeasible(&mut self, method: &str, budget: impl fmt::Display, reason: impl ToString) {
        let notes = vec![
            reason.to_string(),
            String::from("the method keeps the registers of its variable table"),
        ];

        self.add(
            Diagnostic::warning()
                .with_code(INFEASIBLE)
                .with_message(format!(
                    "cannot allocate the variables of `{method}` with register budget `{budget}`"
                ))
                .with_notes(notes),
        );
    }
}
