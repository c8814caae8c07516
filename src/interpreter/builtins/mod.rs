pub mod compiler;
pub mod debug;
pub mod external_program;
pub mod filesystem;
pub mod makefile;
pub mod variable;

use crate::interpreter::DispatchError;
use crate::parser::Directive;

/// Borrows the `N` arguments of `directive`.
///
/// The dispatcher checks arity before calling an action, so this only fails
/// when an action is registered with an arity it does not handle.
fn args<const N: usize>(directive: &Directive) -> Result<[&str; N], DispatchError> {
    directive
        .arguments::<N>()
        .ok_or_else(|| DispatchError::ArityMismatch {
            name: directive.name.clone(),
            expected: N,
            found: directive.args.len(),
        })
}
