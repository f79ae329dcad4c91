pub mod console;
pub mod fs;
pub mod logging;
