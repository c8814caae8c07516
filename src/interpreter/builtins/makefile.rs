use crate::interpreter::{DispatchError, ErrorContext as _, Flow, Interpreter};
use crate::makefile::{DEFAULT_MAKEFILE, convert};
use crate::parser::Directive;
use crate::path::Path;

/// Translates the script being run into a Makefile next to it.
pub fn convert_to_make(
    _directive: &Directive,
    interp: &mut Interpreter,
) -> Result<Flow, DispatchError> {
    convert(
        interp.os.as_ref(),
        &interp.script,
        &Path::from(DEFAULT_MAKEFILE),
    )
    .context_action("Failed to convert to Makefile")?;
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use crate::testing::{RecordingOs, interpreter};

    #[test]
    fn test_convert_running_script() {
        let script = "add_flag(-O2)\ncompile(main.c, app)\nconvert_to_make()\n";
        let os = RecordingOs::default().with_file("build.samba", script);
        let mut interp = interpreter(&os);
        let summary = interp.interpret_string(script);

        assert_eq!(summary.failed, 0);
        let state = os.state();
        let makefile = state.file("Makefile").unwrap_or_default();
        assert!(makefile.contains("CFLAGS += -O2\n"));
        assert!(makefile.contains("app: main.c\n"));
        assert_eq!(state.stdout.last().map(String::as_str), Some("Makefile generated: Makefile"));
        assert_eq!(
            state.stderr,
            ["warning: build.samba:3: Directive 'convert_to_make' is not supported in translation mode"]
        );
    }

    #[test]
    fn test_convert_without_script_file() {
        let os = RecordingOs::default();
        let mut interp = interpreter(&os);
        let summary = interp.interpret_string("convert_to_make()\n");

        assert_eq!(summary.failed, 1);
        assert!(os.state().stderr[0].starts_with(
            "line 1: Failed to convert to Makefile: Failed to open build file build.samba"
        ));
    }
}
