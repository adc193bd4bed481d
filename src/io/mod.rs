//! I/O abstraction
//!
//! Everything the runner and the CLI need from the outside world goes
//! through [`InterviewIo`], so a whole interview can be driven from a script
//! in tests.

mod console;
mod scripted;

pub use console::ConsoleIo;
pub use scripted::ScriptedIo;

use std::io;
use std::path::{Path, PathBuf};

pub trait InterviewIo {
    /// Show `prompt` and read one line of input, without the line ending
    fn read_input(&mut self, prompt: &str) -> io::Result<String>;

    /// Print one message
    fn write_output(&mut self, message: &str);

    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Write `contents`, creating parent directories as needed
    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn cwd(&self) -> io::Result<PathBuf>;

    fn join_path(&self, base: &Path, name: &str) -> PathBuf {
        base.join(name)
    }
}
