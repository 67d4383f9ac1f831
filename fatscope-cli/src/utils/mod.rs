mod log;
mod string;

pub use log::*;
pub use string::*;
