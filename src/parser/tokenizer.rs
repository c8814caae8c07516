use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

/// Positional arguments of a single directive call.
pub type ArgumentList = Vec<String>;

/// Splits the text between the parentheses of a call into its arguments.
///
/// Quoted arguments are taken verbatim, including any commas or whitespace
/// inside them. Bare arguments run up to the next comma and lose their
/// trailing whitespace. Stray commas are ignored, and an unterminated quote
/// yields whatever was captured up to the end of the input.
pub fn tokenize(raw: &str) -> ArgumentList {
    let mut args = ArgumentList::new();
    let mut start: Option<usize> = None;
    let mut in_quotes = false;

    for (pos, ch) in raw.char_indices() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                if in_quotes {
                    start = Some(pos + 1);
                } else if let Some(begin) = start.take() {
                    args.push(raw[begin..pos].to_string());
                }
            }
            ',' if !in_quotes => {
                if let Some(begin) = start.take() {
                    args.push(raw[begin..pos].trim_end().to_string());
                }
            }
            ch if !ch.is_whitespace() && start.is_none() => start = Some(pos),
            _ => {}
        }
    }

    if let Some(begin) = start {
        let rest = &raw[begin..];
        let rest = if in_quotes { rest } else { rest.trim_end() };
        args.push(rest.to_string());
    }

    args
}
