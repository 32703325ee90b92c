pub mod ir;
pub mod message;

pub use driver::{BufferedDriver, Driver, IrOutput};

mod driver;
