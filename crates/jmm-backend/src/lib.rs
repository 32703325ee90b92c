pub mod jasmin;

pub use jasmin::{emit, generate, ClassEmitError, EmitError};
