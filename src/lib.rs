#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod interpreter;
pub mod makefile;
pub mod os;
pub mod parser;
pub mod path;
pub mod scope;

#[cfg(test)]
mod testing;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;

use anyhow::Context as _;

use crate::interpreter::{Interpreter, RunSummary};
use crate::makefile::Translation;
use crate::path::Path;
use crate::scope::ExecutionScope;

/// Version of the compiler.
pub const COMPILER_VERSION: &str = "3";
/// Version of the build script language.
pub const LANGUAGE_VERSION: &str = "1";

/// Script read when no other is given.
pub const DEFAULT_SCRIPT: &str = "build.samba";

pub fn version_banner() -> String {
    format!("SambaCompiler v{COMPILER_VERSION}\n| samba v{LANGUAGE_VERSION}")
}

pub fn version_short() -> String {
    format!("v{COMPILER_VERSION}")
}

pub struct Samba {
    os: Rc<dyn os::Os>,
}

impl Samba {
    pub fn new(os: impl os::Os) -> Self {
        let os = Rc::new(os);
        Self { os }
    }

    /// Executes `script` for the requested targets.
    ///
    /// Only an unreadable script is an error; problems on individual lines
    /// are reported through the [`os::Os`] and counted in the summary.
    pub fn run<I, S>(&self, script: impl AsRef<str>, targets: I) -> anyhow::Result<RunSummary>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut interp = Interpreter::new(
            self.os.clone(),
            Path::from(script.as_ref()),
            ExecutionScope::new(targets),
        );
        interp.interpret_file()
    }

    /// Writes the Makefile equivalent of `script` to `output`.
    pub fn translate(
        &self,
        script: impl AsRef<str>,
        output: impl AsRef<str>,
    ) -> anyhow::Result<Translation> {
        makefile::convert(
            self.os.as_ref(),
            &Path::from(script.as_ref()),
            &Path::from(output.as_ref()),
        )
    }
}

pub(crate) fn read_script(os: &dyn os::Os, path: &Path) -> anyhow::Result<String> {
    let data = os
        .read_file(path)
        .with_context(|| format!("Failed to open build file {path}"))?;
    String::from_utf8(data).with_context(|| format!("Build file {path} is not valid UTF-8"))
}
