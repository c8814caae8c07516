use alloc::format;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;
use core::fmt;

use crate::path::Path;

pub const DEFAULT_COMPILER: &str = "gcc";
pub const WINDOWS_COMPILER: &str = "x86_64-w64-mingw32-gcc";

/// Build settings accumulated by the directives of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    compiler: String,
    verbose: bool,
    variables: Vec<(String, String)>,
    flags: Vec<String>,
    libraries: Vec<String>,
    include_dirs: Vec<String>,
    library_paths: Vec<String>,
    link_flags: Vec<String>,
    build_dir: Option<Path>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            verbose: false,
            variables: Vec::new(),
            flags: Vec::new(),
            libraries: Vec::new(),
            include_dirs: Vec::new(),
            library_paths: Vec::new(),
            link_flags: Vec::new(),
            build_dir: None,
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn set_compiler(&mut self, compiler: impl Into<String>) {
        self.compiler = compiler.into();
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Defines `name`, replacing the value of an earlier definition in place.
    pub fn define_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.variables.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.variables.push((name, value)),
        }
    }

    pub fn remove_variable(&mut self, name: &str) -> bool {
        let before = self.variables.len();
        self.variables.retain(|(n, _)| n != name);
        self.variables.len() != before
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn add_flag(&mut self, flag: impl Into<String>) {
        self.flags.push(flag.into());
    }

    /// Removes every occurrence of `flag`.
    pub fn remove_flag(&mut self, flag: &str) -> bool {
        let before = self.flags.len();
        self.flags.retain(|f| f != flag);
        self.flags.len() != before
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    pub fn define_library(&mut self, name: impl Into<String>) {
        self.libraries.push(name.into());
    }

    pub fn libraries(&self) -> &[String] {
        &self.libraries
    }

    pub fn define_include(&mut self, dir: impl Into<String>) {
        self.include_dirs.push(dir.into());
    }

    pub fn define_library_path(&mut self, path: impl Into<String>) {
        self.library_paths.push(path.into());
    }

    pub fn add_link_flag(&mut self, flag: impl Into<String>) {
        self.link_flags.push(flag.into());
    }

    pub fn build_dir(&self) -> Option<&Path> {
        self.build_dir.as_ref()
    }

    pub fn set_build_dir(&mut self, dir: Path) {
        self.build_dir = Some(dir);
    }

    /// Where a relative output file lands once a build directory is set.
    pub fn output_path(&self, output: &str) -> Path {
        match &self.build_dir {
            Some(dir) => dir.join(output),
            None => Path::from(output),
        }
    }

    /// Compiler arguments (without the compiler itself) to build `output` from `source`.
    pub fn compile_args(&self, source: &str, output: &Path) -> Vec<String> {
        let mut args = self.flags.clone();
        args.extend(
            self.variables
                .iter()
                .map(|(name, value)| format!("-D{name}={value}")),
        );
        args.extend(self.include_dirs.iter().map(|dir| format!("-I{dir}")));
        args.push("-o".to_string());
        args.push(output.to_string());
        args.push(source.to_string());
        args.extend(self.library_paths.iter().map(|path| format!("-L{path}")));
        args.extend(self.libraries.iter().map(|lib| format!("-l{lib}")));
        args.extend(self.link_flags.iter().cloned());
        args
    }

    /// Human readable summary of the configuration.
    pub fn report(&self) -> String {
        Report(self).to_string()
    }
}

struct Report<'a>(&'a BuildConfig);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        writeln!(f, "Build Report\n============")?;
        writeln!(f, "Compiler: {}", config.compiler)?;
        writeln!(f, "Verbose: {}", config.verbose)?;
        if let Some(dir) = &config.build_dir {
            writeln!(f, "Build directory: {dir}")?;
        }

        writeln!(f, "\nVariables:")?;
        for (name, value) in &config.variables {
            writeln!(f, "  {name} = {value}")?;
        }

        let sections = [
            ("Flags", &config.flags),
            ("Libraries", &config.libraries),
            ("Include directories", &config.include_dirs),
            ("Library paths", &config.library_paths),
            ("Link flags", &config.link_flags),
        ];
        for (title, items) in sections {
            writeln!(f, "\n{title}:")?;
            for item in items {
                writeln!(f, "  {item}")?;
            }
        }
        Ok(())
    }
}
