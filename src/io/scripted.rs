use super::InterviewIo;
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

/// Scripted input, recorded output and an in-memory filesystem
///
/// Running out of scripted input is an `UnexpectedEof` error, so a test
/// that under-supplies answers fails instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedIo {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
    files: BTreeMap<PathBuf, String>,
    read_only: Vec<PathBuf>,
    cwd: PathBuf,
}

impl ScriptedIo {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            cwd: PathBuf::from("/work"),
            ..Default::default()
        }
    }

    /// Seed a file
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Refuse writes anywhere under `dir`
    pub fn with_read_only(mut self, dir: impl Into<PathBuf>) -> Self {
        self.read_only.push(dir.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Prompts shown to `read_input`, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// All output joined with newlines
    pub fn output_text(&self) -> String {
        self.output.join("\n")
    }

    pub fn contains_output(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn file(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().map(|(p, c)| (p.as_path(), c.as_str()))
    }
}

impl InterviewIo for ScriptedIo {
    fn read_input(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted input exhausted")
        })
    }

    fn write_output(&mut self, message: &str) {
        self.output.push(message.to_string());
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        if self.read_only.iter().any(|dir| path.starts_with(dir)) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn cwd(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_inputs_in_order() {
        let mut io = ScriptedIo::new(["first", "second"]);
        assert_eq!(io.read_input("a: ").unwrap(), "first");
        assert_eq!(io.read_input("b: ").unwrap(), "second");

        let err = io.read_input("c: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert_eq!(io.prompts(), &["a: ", "b: ", "c: "]);
    }

    #[test]
    fn test_read_only_dir_rejects_writes() {
        let mut io = ScriptedIo::default().with_read_only("/locked");

        let err = io.write_file(Path::new("/locked/a.txt"), "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(io.file(Path::new("/locked/a.txt")).is_none());
        assert!(io.write_file(Path::new("/open/a.txt"), "x").is_ok());
    }

    #[test]
    fn test_in_memory_files() {
        let mut io = ScriptedIo::new(Vec::<String>::new()).with_file("/q.yaml", "questions: []");
        assert!(io.exists(Path::new("/q.yaml")));
        assert_eq!(io.read_file(Path::new("/q.yaml")).unwrap(), "questions: []");

        io.write_file(Path::new("/out/result.txt"), "done").unwrap();
        assert_eq!(io.file(Path::new("/out/result.txt")), Some("done"));
        assert!(io.read_file(Path::new("/missing")).is_err());
    }

    #[test]
    fn test_records_output() {
        let mut io = ScriptedIo::default();
        io.write_output("❓ Question one");
        io.write_output("done");
        assert!(io.contains_output("Question one"));
        assert_eq!(io.output_text(), "❓ Question one\ndone");
    }
}
