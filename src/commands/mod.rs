pub mod chunk;
pub mod design;
pub mod logging;
