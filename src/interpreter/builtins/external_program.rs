use alloc::format;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use super::args;
use crate::interpreter::{DispatchError, ErrorContext as _, Flow, Interpreter, bail_action};
use crate::parser::Directive;

const PKG_CONFIG: &str = "pkg-config";
const NOTIFY_SEND: &str = "notify-send";

pub fn check_tool(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [tool] = args::<1>(directive)?;
    let path = interp
        .os
        .find_program(tool)
        .with_context_action(|| format!("Required tool '{tool}' was not found"))?;

    interp.os.print(&format!("Found {tool}: {path}"));
    Ok(Flow::Continue)
}

/// Asks pkg-config for `query` (`--libs`, `--cflags`) of `package`.
fn pkg_config(
    interp: &Interpreter,
    query: &str,
    package: &str,
) -> Result<Vec<String>, DispatchError> {
    let result = interp
        .os
        .run_command(PKG_CONFIG, &[query, package])
        .with_context_action(|| format!("Failed to run {PKG_CONFIG}"))?;

    if result.returncode != 0 {
        bail_action!(
            "{} could not find '{}': {}",
            PKG_CONFIG,
            package,
            result.stderr.trim()
        );
    }
    Ok(result
        .stdout
        .split_whitespace()
        .map(|flag| flag.to_string())
        .collect())
}

pub fn find_library(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [name] = args::<1>(directive)?;
    for flag in pkg_config(interp, "--libs", name)? {
        interp.config.add_link_flag(flag);
    }
    interp.os.print(&format!("Found library {name}"));
    Ok(Flow::Continue)
}

pub fn find_flags(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [name] = args::<1>(directive)?;
    for flag in pkg_config(interp, "--cflags", name)? {
        interp.config.add_flag(flag);
    }
    Ok(Flow::Continue)
}

pub fn s_command(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [command] = args::<1>(directive)?;
    if interp.config.verbose() {
        interp.os.print(&format!("$ {command}"));
    }

    let status = interp
        .os
        .run_shell(command)
        .with_context_action(|| format!("Failed to run `{command}`"))?;
    if status != 0 {
        bail_action!("Command `{}` exited with status {}", command, status);
    }
    Ok(Flow::Continue)
}

pub fn send_notification(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [title, message, urgency] = args::<3>(directive)?;
    let result = interp
        .os
        .run_command(NOTIFY_SEND, &["-u", urgency, title, message])
        .with_context_action(|| format!("Failed to run {NOTIFY_SEND}"))?;

    if result.returncode != 0 {
        bail_action!("Failed to send notification: {}", result.stderr.trim());
    }
    Ok(Flow::Continue)
}

pub fn install_dependency(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [name] = args::<1>(directive)?;
    install(interp, name)
}

pub fn check_and_install_dependency(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [name] = args::<1>(directive)?;
    if interp.os.find_program(name).is_ok() {
        interp.os.print(&format!("{name} is already installed"));
        return Ok(Flow::Continue);
    }
    install(interp, name)
}

fn install(interp: &mut Interpreter, name: &str) -> Result<Flow, DispatchError> {
    interp.os.print(&format!("Installing {name}..."));
    interp
        .os
        .install_package(name)
        .with_context_action(|| format!("Failed to install {name}"))?;
    interp.os.print(&format!("Installed {name}"));
    Ok(Flow::Continue)
}
