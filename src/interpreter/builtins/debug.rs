use alloc::format;

use super::args;
use crate::interpreter::{DispatchError, Flow, Interpreter};
use crate::parser::Directive;

pub fn printfn(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [msg] = args::<1>(directive)?;
    interp.os.print(msg);
    Ok(Flow::Continue)
}

pub fn eprintfn(directive: &Directive, interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [msg] = args::<1>(directive)?;
    interp.os.eprint(&format!("\x1b[0;31m{msg}\x1b[0m"));
    Ok(Flow::Continue)
}

pub fn exit(directive: &Directive, _interp: &mut Interpreter) -> Result<Flow, DispatchError> {
    let [code] = args::<1>(directive)?;
    Ok(Flow::Exit(parse_exit_code(code)))
}

/// Reads a leading, optionally signed decimal number; anything unreadable is 0.
fn parse_exit_code(text: &str) -> i32 {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['-', '+']));
    let end = text[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |end| sign_len + end);
    text[..end].parse::<i64>().map_or(0, |code| {
        code.clamp(i32::MIN.into(), i32::MAX.into()) as i32
    })
}
