use super::InterviewIo;
use dialoguer::Input;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Terminal and real filesystem
///
/// Prompts through `dialoguer` when stdin is a terminal, and falls back to
/// plain line reads when input is piped.
#[derive(Debug, Default)]
pub struct ConsoleIo;

impl ConsoleIo {
    pub fn new() -> Self {
        Self
    }
}

impl InterviewIo for ConsoleIo {
    fn read_input(&mut self, prompt: &str) -> io::Result<String> {
        if io::stdin().is_terminal() {
            return Input::<String>::new()
                .with_prompt(prompt.trim_end_matches(|c: char| c == ':' || c.is_whitespace()))
                .allow_empty(true)
                .interact_text()
                .map_err(io::Error::other);
        }

        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the interview finished",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_output(&mut self, message: &str) {
        println!("{}", message);
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn cwd(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}
