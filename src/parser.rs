use alloc::string::{String, ToString as _};

mod error;
mod tokenizer;

pub use error::ParseError;
pub use tokenizer::{ArgumentList, tokenize};

/// A parsed `name(args)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub args: ArgumentList,
}

impl Directive {
    pub fn new(name: impl Into<String>, args: ArgumentList) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Borrows exactly `N` arguments, or `None` if the call has a different count.
    pub fn arguments<const N: usize>(&self) -> Option<[&str; N]> {
        if self.args.len() != N {
            return None;
        }
        Some(core::array::from_fn(|i| self.args[i].as_str()))
    }
}

/// Classification of one physical script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    Blank,
    Comment,
    TargetLabel { name: String },
    Call(Directive),
    Malformed(ParseError),
}

impl ScriptLine {
    pub fn is_call(&self) -> bool {
        matches!(self, ScriptLine::Call(_))
    }
}

pub fn classify(line: &str) -> ScriptLine {
    let line = line.trim();

    if line.is_empty() {
        return ScriptLine::Blank;
    }
    if line.starts_with('#') {
        return ScriptLine::Comment;
    }

    let Some(open) = line.find('(') else {
        let Some(label) = line.strip_suffix(':') else {
            return ScriptLine::Malformed(ParseError::MissingOpenParen);
        };
        let name = label.trim_end();
        if name.is_empty() {
            return ScriptLine::Malformed(ParseError::EmptyLabel);
        }
        return ScriptLine::TargetLabel {
            name: name.to_string(),
        };
    };

    let name = line[..open].trim_end();
    if name.is_empty() {
        return ScriptLine::Malformed(ParseError::MissingName);
    }

    let rest = &line[open + 1..];
    let Some(close) = rest.rfind(')') else {
        return ScriptLine::Malformed(ParseError::MissingCloseParen);
    };

    ScriptLine::Call(Directive::new(name, tokenize(&rest[..close])))
}

/// Classifies every line of `source`, pairing each with its 1-based line number.
pub fn parse_script(source: &str) -> impl Iterator<Item = (usize, ScriptLine)> + '_ {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, classify(line)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn call(name: &str, args: &[&str]) -> ScriptLine {
        ScriptLine::Call(Directive::new(
            name,
            args.iter().map(|arg| arg.to_string()).collect(),
        ))
    }

    #[test]
    fn test_blank_and_comment() {
        assert_eq!(classify(""), ScriptLine::Blank);
        assert_eq!(classify("  \t "), ScriptLine::Blank);
        assert_eq!(classify("# note"), ScriptLine::Comment);
        assert_eq!(classify("   #compile(\"a.c\", \"a.o\")"), ScriptLine::Comment);
    }

    #[test]
    fn test_target_label() {
        assert_eq!(
            classify("release:"),
            ScriptLine::TargetLabel {
                name: "release".into()
            }
        );
        assert_eq!(
            classify("  debug :  "),
            ScriptLine::TargetLabel {
                name: "debug".into()
            }
        );
        assert_eq!(classify(":"), ScriptLine::Malformed(ParseError::EmptyLabel));
    }

    #[test]
    fn test_call() {
        assert_eq!(
            classify(r#"compile("a.c","a.o")"#),
            call("compile", &["a.c", "a.o"])
        );
        assert_eq!(classify("  print_flags()  "), call("print_flags", &[]));
        assert_eq!(classify("add_flag (-O2)"), call("add_flag", &["-O2"]));
    }

    #[test]
    fn test_call_uses_last_closing_paren() {
        assert_eq!(
            classify(r#"printfn("done (finally)")"#),
            call("printfn", &["done (finally)"])
        );
    }

    #[test]
    fn test_parenthesis_wins_over_label() {
        assert_eq!(classify("setup():"), call("setup", &[]));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            classify(r#"compile("a.c", "a.o""#),
            ScriptLine::Malformed(ParseError::MissingCloseParen)
        );
        assert_eq!(
            classify("(\"x\")"),
            ScriptLine::Malformed(ParseError::MissingName)
        );
        assert_eq!(
            classify("clean"),
            ScriptLine::Malformed(ParseError::MissingOpenParen)
        );
    }

    #[test]
    fn test_directive_arguments() {
        let directive = Directive::new("compile", vec!["a.c".into(), "a.o".into()]);
        assert_eq!(directive.arguments::<2>(), Some(["a.c", "a.o"]));
        assert_eq!(directive.arguments::<1>(), None);
        assert_eq!(directive.arguments::<3>(), None);
    }

    #[test]
    fn test_parse_script_numbers_lines() {
        let lines: alloc::vec::Vec<_> = parse_script("# top\n\nrelease:\nprintfn(hi)\n").collect();
        assert_eq!(
            lines,
            vec![
                (1, ScriptLine::Comment),
                (2, ScriptLine::Blank),
                (
                    3,
                    ScriptLine::TargetLabel {
                        name: "release".into()
                    }
                ),
                (4, call("printfn", &["hi"])),
            ]
        );
    }
}
