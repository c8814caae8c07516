use alloc::format;
use alloc::rc::Rc;
use core::fmt;

use log::{debug, info, trace};

use crate::config::BuildConfig;
use crate::os::Os;
use crate::parser::{Directive, ScriptLine, parse_script};
use crate::path::Path;
use crate::scope::ExecutionScope;

mod builtins;
mod error;
pub mod registry;

pub(crate) use error::bail_action;
pub use error::{DispatchError, ErrorContext};
pub use registry::{Action, Builtin, DirectiveRegistry};

/// What the interpreter should do after an action returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// Outcome of running a whole script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Calls that ran to completion.
    pub executed: usize,
    /// Calls outside the requested targets.
    pub skipped: usize,
    /// Lines that were reported as errors.
    pub failed: usize,
    /// Set when the script stopped through `exit`.
    pub exit_code: Option<i32>,
}

pub struct Interpreter {
    pub(crate) os: Rc<dyn Os>,
    pub(crate) config: BuildConfig,
    pub(crate) script: Path,
    scope: ExecutionScope,
    registry: DirectiveRegistry,
}

impl Interpreter {
    pub fn new(os: Rc<dyn Os>, script: Path, scope: ExecutionScope) -> Self {
        Self {
            os,
            config: BuildConfig::new(),
            script,
            scope,
            registry: DirectiveRegistry::builtin(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Binds an additional directive, replacing any builtin of the same name.
    pub fn register(&mut self, name: &'static str, arity: usize, action: Action) {
        self.registry.register(name, arity, action);
    }

    pub fn interpret_file(&mut self) -> anyhow::Result<RunSummary> {
        let source = crate::read_script(self.os.as_ref(), &self.script)?;
        info!(
            "Running {} for target(s) {:?}",
            self.script,
            self.scope.requested()
        );
        Ok(self.interpret_string(&source))
    }

    pub fn interpret_string(&mut self, source: &str) -> RunSummary {
        let mut summary = RunSummary::default();

        for (number, line) in parse_script(source) {
            self.scope.observe(&line);

            match line {
                ScriptLine::Call(ref directive) if self.scope.applies(&line) => {
                    match self.dispatch(directive) {
                        Ok(Flow::Continue) => summary.executed += 1,
                        Ok(Flow::Exit(code)) => {
                            summary.executed += 1;
                            summary.exit_code = Some(code);
                            info!("{}:{number}: exit({code})", self.script);
                            break;
                        }
                        Err(err) => {
                            summary.failed += 1;
                            self.report(number, &err);
                        }
                    }
                }
                ScriptLine::Call(directive) => {
                    trace!(
                        "{}:{number}: skipping '{}' outside the requested targets",
                        self.script, directive.name
                    );
                    summary.skipped += 1;
                }
                ScriptLine::Malformed(err) if self.scope.is_active() => {
                    summary.failed += 1;
                    self.report(number, &err);
                }
                ScriptLine::TargetLabel { name } => {
                    debug!("{}:{number}: entering target '{name}'", self.script);
                }
                ScriptLine::Malformed(_) | ScriptLine::Blank | ScriptLine::Comment => {}
            }
        }

        info!(
            "{}: {} executed, {} skipped, {} failed",
            self.script, summary.executed, summary.skipped, summary.failed
        );
        summary
    }

    pub fn dispatch(&mut self, directive: &Directive) -> Result<Flow, DispatchError> {
        let Some(builtin) = self.registry.get(&directive.name) else {
            return Err(DispatchError::UnknownDirective(directive.name.clone()));
        };

        if directive.args.len() != builtin.arity {
            return Err(DispatchError::ArityMismatch {
                name: directive.name.clone(),
                expected: builtin.arity,
                found: directive.args.len(),
            });
        }

        debug!("{}({:?})", directive.name, directive.args);
        (builtin.action)(directive, self)
    }

    fn report(&self, number: usize, err: &dyn fmt::Display) {
        debug!("{}:{number}: {err}", self.script);
        self.os.eprint(&format!("line {number}: {err}"));
    }
}
