use alloc::format;

use super::args;
use crate::interpreter::{DispatchError, Flow, Interpreter, bail_action};
use crate::parser::Directive;

pub fn define_variable(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [name, value] = args::<2>(directive)?;
    interp.config.define_variable(name, value);
    Ok(Flow::Continue)
}

pub fn remove_variable(
    directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    let [name] = args::<1>(directive)?;
    if !interp.config.remove_variable(name) {
        bail_action!("Variable '{}' is not defined", name);
    }
    Ok(Flow::Continue)
}

pub fn list_defined_variables(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    interp.os.print("Defined variables:");
    for (name, value) in interp.config.variables() {
        interp.os.print(&format!("  {name} = {value}"));
    }
    Ok(Flow::Continue)
}
