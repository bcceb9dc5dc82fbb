pub mod registry;
pub mod selection;

pub use registry::*;
pub use selection::*;
