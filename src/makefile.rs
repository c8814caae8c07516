//! Translation of build scripts into Makefiles.
//!
//! Only a fixed subset of directives has a Makefile counterpart. Everything
//! else is left out of the generated file and reported back as a
//! [`TranslateError`] so the caller can warn about it.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use anyhow::Context as _;
use log::{debug, info};

use crate::os::Os;
use crate::parser::{Directive, ParseError, ScriptLine, parse_script};
use crate::path::Path;

pub const DEFAULT_MAKEFILE: &str = "Makefile";

pub const PREAMBLE: &str = "\
# Autogenerated by samba

CC = gcc
CFLAGS = -Wall
LDFLAGS =
LIBS =
INCLUDES =
LIBRARY_PATHS =

";

const COMPILE_RECIPE: &str = "\t$(CC) $(CFLAGS) $(INCLUDES) -o $@ $^ $(LDFLAGS) $(LIBRARY_PATHS) $(LIBS)";

#[derive(Debug, Clone, PartialEq)]
pub enum TranslateError {
    Unsupported(String),
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    Malformed(ParseError),
    Write(fmt::Error),
}

impl From<fmt::Error> for TranslateError {
    fn from(err: fmt::Error) -> Self {
        TranslateError::Write(err)
    }
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TranslateError::Unsupported(name) => write!(
                f,
                "Directive '{}' is not supported in translation mode",
                name
            ),
            TranslateError::ArityMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "Directive '{}' expects {} argument(s), got {}",
                name, expected, found
            ),
            TranslateError::Malformed(err) => write!(f, "{}", err),
            TranslateError::Write(err) => write!(f, "Failed to write Makefile: {}", err),
        }
    }
}

impl core::error::Error for TranslateError {}

/// The directives that have a Makefile counterpart.
enum Rule<'a> {
    Variable { name: &'a str, value: &'a str },
    Library(&'a str),
    Flag(&'a str),
    Include(&'a str),
    LibraryPath(&'a str),
    Link(&'a str),
    Compile { source: &'a str, output: &'a str },
    Target(&'a str),
    Clean,
}

fn expect<const N: usize>(directive: &Directive) -> Result<[&str; N], TranslateError> {
    directive
        .arguments::<N>()
        .ok_or_else(|| TranslateError::ArityMismatch {
            name: directive.name.clone(),
            expected: N,
            found: directive.args.len(),
        })
}

impl<'a> Rule<'a> {
    fn from_directive(directive: &'a Directive) -> Result<Self, TranslateError> {
        let rule = match directive.name.as_str() {
            "define_variable" => {
                let [name, value] = expect::<2>(directive)?;
                Rule::Variable { name, value }
            }
            "define_library" => {
                let [name] = expect::<1>(directive)?;
                Rule::Library(name)
            }
            "add_flag" => {
                let [flag] = expect::<1>(directive)?;
                Rule::Flag(flag)
            }
            "include_directory" => {
                let [dir] = expect::<1>(directive)?;
                Rule::Include(dir)
            }
            "library_path" => {
                let [path] = expect::<1>(directive)?;
                Rule::LibraryPath(path)
            }
            "link_library" => {
                let [name] = expect::<1>(directive)?;
                Rule::Link(name)
            }
            "compile" => {
                let [source, output] = expect::<2>(directive)?;
                Rule::Compile { source, output }
            }
            "target" => {
                let [name] = expect::<1>(directive)?;
                Rule::Target(name)
            }
            "clean" => {
                let [] = expect::<0>(directive)?;
                Rule::Clean
            }
            _ => return Err(TranslateError::Unsupported(directive.name.clone())),
        };
        Ok(rule)
    }
}

/// Writes Makefile rules for classified script lines.
///
/// The preamble is written when the emitter is created, so every generated
/// file starts with the same variable defaults. A `clean` rule is emitted
/// at most once.
pub struct Makefile<W> {
    out: W,
    clean_emitted: bool,
}

impl<W: fmt::Write> Makefile<W> {
    pub fn new(mut out: W) -> Result<Self, fmt::Error> {
        out.write_str(PREAMBLE)?;
        Ok(Self {
            out,
            clean_emitted: false,
        })
    }

    pub fn emit(&mut self, line: &ScriptLine) -> Result<(), TranslateError> {
        let directive = match line {
            ScriptLine::Call(directive) => directive,
            ScriptLine::Malformed(err) => return Err(TranslateError::Malformed(*err)),
            ScriptLine::Blank | ScriptLine::Comment | ScriptLine::TargetLabel { .. } => {
                return Ok(());
            }
        };

        match Rule::from_directive(directive)? {
            Rule::Variable { name, value } => writeln!(self.out, "{name} = {value}")?,
            Rule::Library(name) => writeln!(self.out, "LIBRARY = {name}")?,
            Rule::Flag(flag) => writeln!(self.out, "CFLAGS += {flag}")?,
            Rule::Include(dir) => writeln!(self.out, "INCLUDES += -I{dir}")?,
            Rule::LibraryPath(path) => writeln!(self.out, "LIBRARY_PATHS += -L{path}")?,
            Rule::Link(name) => writeln!(self.out, "LIBS += -l{name}")?,
            Rule::Compile { source, output } => {
                write!(self.out, "{output}: {source}\n{COMPILE_RECIPE}\n\n")?
            }
            Rule::Target(name) => write!(
                self.out,
                ".PHONY: {name}\n{name}:\n\t@echo Building {name}\n\n"
            )?,
            Rule::Clean if self.clean_emitted => {}
            Rule::Clean => {
                self.clean_emitted = true;
                self.out
                    .write_str(".PHONY: clean\nclean:\n\t@rm -f *.o $(LIBRARY)\n\n")?
            }
        }
        Ok(())
    }

    pub fn finish(self) -> W {
        self.out
    }
}

/// A generated Makefile together with the lines that could not be translated.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub makefile: String,
    pub warnings: Vec<(usize, TranslateError)>,
}

pub fn translate(source: &str) -> Result<Translation, fmt::Error> {
    let mut makefile = Makefile::new(String::new())?;
    let mut warnings = Vec::new();

    for (number, line) in parse_script(source) {
        match makefile.emit(&line) {
            Ok(()) => {}
            Err(TranslateError::Write(err)) => return Err(err),
            Err(err) => warnings.push((number, err)),
        }
    }

    Ok(Translation {
        makefile: makefile.finish(),
        warnings,
    })
}

/// Translates the script at `script` and writes the result to `output`.
pub fn convert(os: &dyn Os, script: &Path, output: &Path) -> anyhow::Result<Translation> {
    let source = crate::read_script(os, script)?;
    let translation = translate(&source).with_context(|| format!("Failed to translate {script}"))?;

    for (number, warning) in &translation.warnings {
        debug!("{script}:{number}: {warning}");
        os.eprint(&format!("warning: {script}:{number}: {warning}"));
    }

    os.write_file(output, translation.makefile.as_bytes())
        .with_context(|| format!("Failed to create {output}"))?;

    info!(
        "{script} -> {output} ({} line(s) skipped)",
        translation.warnings.len()
    );
    os.print(&format!("Makefile generated: {output}"));
    Ok(translation)
}
