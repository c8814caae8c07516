use alloc::format;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use log::debug;

use super::args;
use crate::config::WINDOWS_COMPILER;
use crate::interpreter::{DispatchError, ErrorContext as _, Flow, Interpreter, bail_action};
use crate::parser::Directive;

const MEMORY_SANITIZER_FLAGS: &[&str] = &["-fsanitize=address", "-fno-omit-frame-pointer"];
const WARNING_FLAGS: &[&str] = &["-Wall", "-Wextra", "-Wpedantic"];

pub fn add_flag(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [flag] = args::<1>(directive)?;
    interp.config.add_flag(flag);
    Ok(Flow::Continue)
}

pub fn remove_flag(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [flag] = args::<1>(directive)?;
    if !interp.config.remove_flag(flag) {
        bail_action!("Flag '{}' is not set", flag);
    }
    Ok(Flow::Continue)
}

pub fn print_flags(_directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    interp.os.print("Flags:");
    for flag in interp.config.flags() {
        interp.os.print(&format!("  {flag}"));
    }
    Ok(Flow::Continue)
}

pub fn define_library(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [name] = args::<1>(directive)?;
    interp.config.define_library(name);
    Ok(Flow::Continue)
}

pub fn define_include(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [dir] = args::<1>(directive)?;
    interp.config.define_include(dir);
    Ok(Flow::Continue)
}

pub fn define_library_path(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [path] = args::<1>(directive)?;
    interp.config.define_library_path(path);
    Ok(Flow::Continue)
}

pub fn print_libraries(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    interp.os.print("Libraries:");
    for lib in interp.config.libraries() {
        interp.os.print(&format!("  {lib}"));
    }
    Ok(Flow::Continue)
}

pub fn add_memory_sanitizer(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    for flag in MEMORY_SANITIZER_FLAGS {
        interp.config.add_flag(*flag);
    }
    Ok(Flow::Continue)
}

pub fn add_compiler_warnings(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    for flag in WARNING_FLAGS {
        interp.config.add_flag(*flag);
    }
    Ok(Flow::Continue)
}

pub fn enable_verbose(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    interp.config.set_verbose(true);
    Ok(Flow::Continue)
}

pub fn win_compiler(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    interp.config.set_compiler(WINDOWS_COMPILER);
    Ok(Flow::Continue)
}

pub fn reset_settings(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    interp.config.reset();
    Ok(Flow::Continue)
}

pub fn compile(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    compile_with(directive, interp, false)
}

pub fn compile_s(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    compile_with(directive, interp, true)
}

/// Runs the configured compiler on one source file.
///
/// In silent mode only failures are reported; otherwise progress and
/// compiler diagnostics are echoed as well. Verbose mode always echoes the
/// full command line.
fn compile_with(
    directive: &Directive,
    interp: &mut Interpreter,
    silent: bool,
) -> Result<Flow, DispatchError> {
    let [source, output] = args::<2>(directive)?;

    let output = interp.config.output_path(output);
    let compiler = interp.config.compiler().to_string();
    let compile_args = interp.config.compile_args(source, &output);

    if interp.config.verbose() {
        interp
            .os
            .print(&format!("{compiler} {}", compile_args.join(" ")));
    } else if !silent {
        interp.os.print(&format!("Compiling {source} -> {output}"));
    }

    debug!("running {compiler} {compile_args:?}");
    let compile_args: Vec<&str> = compile_args.iter().map(String::as_str).collect();
    let result = interp
        .os
        .run_command(&compiler, &compile_args)
        .with_context_action(|| format!("Failed to run {compiler}"))?;

    if !silent && !result.stdout.is_empty() {
        interp.os.print(result.stdout.trim_end());
    }
    if (!silent || result.returncode != 0) && !result.stderr.is_empty() {
        interp.os.eprint(result.stderr.trim_end());
    }
    if result.returncode != 0 {
        bail_action!(
            "Compilation of {} failed with exit code {}",
            source,
            result.returncode
        );
    }

    Ok(Flow::Continue)
}
