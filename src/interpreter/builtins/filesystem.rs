use alloc::format;

use super::args;
use crate::interpreter::{DispatchError, ErrorContext as _, Flow, Interpreter, bail_action};
use crate::parser::Directive;
use crate::path::Path;

const TIMESTAMP_FILE: &str = "build_timestamp.txt";

pub fn file_exists(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [path] = args::<1>(directive)?;
    let exists = interp
        .os
        .exists(&Path::from(path))
        .with_context_action(|| format!("Failed to check whether {path} exists"))?;

    if exists {
        interp.os.print(&format!("File '{path}' exists"));
    } else {
        interp.os.print(&format!("File '{path}' does not exist"));
    }
    Ok(Flow::Continue)
}

pub fn set_build_directory(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [dir] = args::<1>(directive)?;
    let dir = Path::from(dir);

    interp
        .os
        .create_dir_all(&dir)
        .with_context_action(|| format!("Failed to create build directory {dir}"))?;
    if interp.config.verbose() {
        interp.os.print(&format!("Build directory set to {dir}"));
    }
    interp.config.set_build_dir(dir);
    Ok(Flow::Continue)
}

fn build_dir(interp: &Interpreter) -> Result<Path, DispatchError> {
    interp
        .config
        .build_dir()
        .cloned()
        .context_action("No build directory set, use set_build_directory first")
}

fn ensure_dir(interp: &Interpreter, dir: &Path) -> Result<(), DispatchError> {
    let is_dir = interp
        .os
        .is_dir(dir)
        .with_context_action(|| format!("Failed to inspect {dir}"))?;
    if !is_dir {
        bail_action!("Build directory {} is missing or not a directory", dir);
    }
    Ok(())
}

pub fn clear_build_directory(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let dir = build_dir(interp)?;

    let exists = interp
        .os
        .exists(&dir)
        .with_context_action(|| format!("Failed to check whether {dir} exists"))?;
    if exists {
        ensure_dir(interp, &dir)?;
        interp
            .os
            .remove_dir_all(&dir)
            .with_context_action(|| format!("Failed to remove {dir}"))?;
    }
    interp
        .os
        .create_dir_all(&dir)
        .with_context_action(|| format!("Failed to create build directory {dir}"))?;

    interp.os.print(&format!("Cleared build directory {dir}"));
    Ok(Flow::Continue)
}

pub fn backup_build_directory(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [destination] = args::<1>(directive)?;
    let dir = build_dir(interp)?;
    let destination = Path::from(destination);
    ensure_dir(interp, &dir)?;

    interp
        .os
        .copy_dir(&dir, &destination)
        .with_context_action(|| format!("Failed to back up {dir} to {destination}"))?;

    interp
        .os
        .print(&format!("Backed up {dir} to {destination}"));
    Ok(Flow::Continue)
}

pub fn list_files_in_directory(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [dir] = args::<1>(directive)?;

    let mut entries = interp
        .os
        .list_dir(&Path::from(dir))
        .with_context_action(|| format!("Failed to list {dir}"))?;
    entries.sort();

    interp.os.print(&format!("Files in {dir}:"));
    for entry in entries {
        interp.os.print(&format!("  {entry}"));
    }
    Ok(Flow::Continue)
}

pub fn generate_build_report_to_file(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [file] = args::<1>(directive)?;
    let path = Path::from(file);

    let report = interp.config.report();
    interp
        .os
        .write_file(&path, report.as_bytes())
        .with_context_action(|| format!("Failed to write build report to {path}"))?;

    interp.os.print(&format!("Build report written to {path}"));
    Ok(Flow::Continue)
}

pub fn generate_timestamp_file(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let path = interp.config.output_path(TIMESTAMP_FILE);
    let content = format!("Build timestamp: {}\n", interp.os.timestamp());

    interp
        .os
        .write_file(&path, content.as_bytes())
        .with_context_action(|| format!("Failed to write {path}"))?;
    Ok(Flow::Continue)
}
