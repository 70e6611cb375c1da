use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Scratch registry tree rooted in a temporary directory.
pub struct Registry {
    temp: TempDir,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("temp registry"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Create `<root>/<dir>/devfile.yaml` with the given contents.
    pub fn add_stack(&self, dir: &str, devfile: &str) -> PathBuf {
        let stack = self.root().join(dir);
        fs::create_dir_all(&stack).expect("create stack dir");
        fs::write(stack.join("devfile.yaml"), devfile).expect("write devfile");
        stack
    }

    pub fn add_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn add_dir(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(&path).expect("create dir");
        path
    }
}

/// Minimal descriptor that passes the bundled schema.
pub fn devfile(name: &str) -> String {
    format!("schemaVersion: 2.2.0\nmetadata:\n  name: {name}\n")
}

pub fn index_generator() -> Command {
    Command::new(env!("CARGO_BIN_EXE_index-generator"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
