//! A fake host that records what build scripts ask it to do.

use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use anyhow::{anyhow, bail};

use crate::interpreter::Interpreter;
use crate::os::{Os, Path, Result, RunCommandOutput};
use crate::scope::ExecutionScope;

pub const TIMESTAMP: &str = "1700000000";

#[derive(Default)]
pub struct State {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
    pub commands: Vec<String>,
    pub files: BTreeMap<String, Vec<u8>>,
    pub dirs: BTreeSet<String>,
    pub removed: Vec<String>,
    pub copies: Vec<(String, String)>,
    pub installed: Vec<String>,
    programs: BTreeSet<String>,
    outputs: BTreeMap<String, (String, String, i64)>,
}

impl State {
    pub fn file(&self, path: &str) -> Option<String> {
        self.files
            .get(path)
            .map(|data| String::from_utf8_lossy(data).into_owned())
    }

    fn output(&self, cmd: &str) -> (String, String, i64) {
        self.outputs
            .get(cmd)
            .cloned()
            .unwrap_or((String::new(), String::new(), 0))
    }
}

#[derive(Clone, Default)]
pub struct RecordingOs {
    state: Rc<RefCell<State>>,
}

impl RecordingOs {
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.state
            .borrow_mut()
            .files
            .insert(path.into(), content.as_bytes().to_vec());
        self
    }

    pub fn with_program(self, name: &str) -> Self {
        self.state.borrow_mut().programs.insert(name.into());
        self
    }

    pub fn with_command_output(self, cmd: &str, stdout: &str, stderr: &str, code: i64) -> Self {
        self.state
            .borrow_mut()
            .outputs
            .insert(cmd.into(), (stdout.into(), stderr.into(), code));
        self
    }

    pub fn state(&self) -> Ref<'_, State> {
        self.state.borrow()
    }
}

fn prefix(dir: &Path) -> String {
    format!("{}/", dir.as_ref().trim_end_matches('/'))
}

impl Os for RecordingOs {
    fn print(&self, msg: &str) {
        self.state.borrow_mut().stdout.push(msg.into());
    }

    fn eprint(&self, msg: &str) {
        self.state.borrow_mut().stderr.push(msg.into());
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let state = self.state.borrow();
        Ok(state.files.contains_key(path.as_ref()) || self.is_dir(path)?)
    }

    fn is_dir(&self, path: &Path) -> Result<bool> {
        let state = self.state.borrow();
        let prefix = prefix(path);
        Ok(state.dirs.contains(path.as_ref()) || state.files.keys().any(|f| f.starts_with(&prefix)))
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        self.state
            .borrow()
            .files
            .get(path.as_ref())
            .cloned()
            .ok_or_else(|| anyhow!("No such file: {path}"))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        self.state
            .borrow_mut()
            .files
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.state.borrow_mut().dirs.insert(path.to_string());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let prefix = prefix(path);
        state.files.retain(|f, _| !f.starts_with(&prefix));
        state.dirs.retain(|d| d != path.as_ref() && !d.starts_with(&prefix));
        state.removed.push(path.to_string());
        Ok(())
    }

    fn copy_dir(&self, from: &Path, to: &Path) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let from_prefix = prefix(from);
        let to_prefix = prefix(to);
        let copied: Vec<_> = state
            .files
            .iter()
            .filter_map(|(f, data)| {
                let rest = f.strip_prefix(&from_prefix)?;
                Some((format!("{to_prefix}{rest}"), data.clone()))
            })
            .collect();
        state.files.extend(copied);
        state.dirs.insert(to.to_string());
        state.copies.push((from.to_string(), to.to_string()));
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        let state = self.state.borrow();
        let prefix = prefix(path);
        let entries: BTreeSet<String> = state
            .files
            .keys()
            .filter_map(|f| f.strip_prefix(&prefix))
            .map(|rest| rest.split('/').next().unwrap_or(rest).to_string())
            .collect();
        if entries.is_empty() && !state.dirs.contains(path.as_ref()) {
            bail!("No such directory: {path}");
        }
        Ok(entries.into_iter().collect())
    }

    fn find_program(&self, name: &str) -> Result<Path> {
        if self.state.borrow().programs.contains(name) {
            Ok(Path::from(format!("/usr/bin/{name}")))
        } else {
            bail!("{name} not found in PATH")
        }
    }

    fn run_command(&self, cmd: &str, args: &[&str]) -> Result<RunCommandOutput> {
        let mut state = self.state.borrow_mut();
        let mut line = String::from(cmd);
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        state.commands.push(line);

        let (stdout, stderr, returncode) = state.output(cmd);
        Ok(RunCommandOutput {
            stdout,
            stderr,
            returncode,
        })
    }

    fn run_shell(&self, command: &str) -> Result<i64> {
        let mut state = self.state.borrow_mut();
        state.commands.push(format!("sh -c {command}"));
        Ok(state.output("sh").2)
    }

    fn install_package(&self, name: &str) -> Result<()> {
        self.state.borrow_mut().installed.push(name.into());
        Ok(())
    }

    fn timestamp(&self) -> String {
        TIMESTAMP.into()
    }
}

/// An interpreter for `build.samba` running against `os` with the default target.
pub fn interpreter(os: &RecordingOs) -> Interpreter {
    Interpreter::new(
        Rc::new(os.clone()),
        Path::from("build.samba"),
        ExecutionScope::default(),
    )
}
