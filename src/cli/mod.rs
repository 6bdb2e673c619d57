//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes defining commands, parsing arguments, prompting for the address
//! to look up and rendering lookup results as they stream in.

mod commands;
mod prompt;
mod render;

pub use commands::*;
pub use prompt::*;
pub use render::*;
