use crate::message::Messages;

pub trait Driver {
    fn report(&mut self, messages: Messages);

    /// Output some intermediate result for the given stage. The text is taken
    /// as a function, since generating it would usually be wasteful.
    fn output_ir(&mut self, at: IrOutput, data: impl FnOnce() -> String);
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IrOutput {
    Liveness,
    Interference,
}

/// A driver which keeps everything it is given. Mostly useful for tests and
/// for embedding the backend in other tools.
#[derive(Debug, Default)]
pub struct BufferedDriver {
    pub messages: Messages,
    pub outputs: Vec<(IrOutput, String)>,
    pub capture: Vec<IrOutput>,
}

impl BufferedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also keep the intermediate output of the given stage.
    pub fn capturing(mut self, at: IrOutput) -> Self {
        self.capture.push(at);
        self
    }
}

impl Driver for BufferedDriver {
    fn report(&mut self, messages: Messages) {
        self.messages.merge(messages);
    }

    fn output_ir(&mut self, at: IrOutput, data: impl FnOnce() -> String) {
        if self.capture.contains(&at) {
            self.outputs.push((at, data()));
        }
    }
}
