use hashbrown::HashMap;

use super::builtins::{compiler, debug, external_program, filesystem, makefile, variable};
use super::{DispatchError, Flow, Interpreter};
use crate::parser::Directive;

pub type Action = fn(&Directive, &mut Interpreter) -> Result<Flow, DispatchError>;

/// A directive binding: how many arguments it takes and what it does.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub arity: usize,
    pub action: Action,
}

const BUILTINS: &[(&str, usize, Action)] = &[
    // configuration
    ("define_variable", 2, variable::define_variable),
    ("remove_variable", 1, variable::remove_variable),
    ("list_defined_variables", 0, variable::list_defined_variables),
    ("define_library", 1, compiler::define_library),
    ("define_include", 1, compiler::define_include),
    ("define_library_path", 1, compiler::define_library_path),
    ("print_libraries", 0, compiler::print_libraries),
    ("add_flag", 1, compiler::add_flag),
    ("remove_flag", 1, compiler::remove_flag),
    ("print_flags", 0, compiler::print_flags),
    ("add_memory_sanitizer", 0, compiler::add_memory_sanitizer),
    ("add_compiler_warnings", 0, compiler::add_compiler_warnings),
    ("enable_verbose", 0, compiler::enable_verbose),
    ("win_compiler", 0, compiler::win_compiler),
    ("reset_settings", 0, compiler::reset_settings),
    // compilation
    ("compile", 2, compiler::compile),
    ("compile_s", 2, compiler::compile_s),
    // console
    ("printfn", 1, debug::printfn),
    ("eprintfn", 1, debug::eprintfn),
    ("exit", 1, debug::exit),
    // files and directories
    ("file_exists", 1, filesystem::file_exists),
    ("set_build_directory", 1, filesystem::set_build_directory),
    ("clear_build_directory", 0, filesystem::clear_build_directory),
    ("backup_build_directory", 1, filesystem::backup_build_directory),
    ("list_files_in_directory", 1, filesystem::list_files_in_directory),
    ("generate_build_report_to_file", 1, filesystem::generate_build_report_to_file),
    ("generate_timestamp_file", 0, filesystem::generate_timestamp_file),
    // host programs
    ("check_tool", 1, external_program::check_tool),
    ("find_library", 1, external_program::find_library),
    ("find_flags", 1, external_program::find_flags),
    ("s_command", 1, external_program::s_command),
    ("send_notification", 3, external_program::send_notification),
    ("install_dependency", 1, external_program::install_dependency),
    ("check_and_install_dependency", 1, external_program::check_and_install_dependency),
    // translation
    ("convert_to_make", 0, makefile::convert_to_make),
];

/// Maps directive names to their bindings.
pub struct DirectiveRegistry {
    builtins: HashMap<&'static str, Builtin>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self {
            builtins: HashMap::new(),
        }
    }

    /// The registry with every directive the language ships with.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &(name, arity, action) in BUILTINS {
            registry.register(name, arity, action);
        }
        registry
    }

    pub fn register(&mut self, name: &'static str, arity: usize, action: Action) -> Option<Builtin> {
        self.builtins.insert(name, Builtin { arity, action })
    }

    pub fn get(&self, name: &str) -> Option<Builtin> {
        self.builtins.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_arities() {
        let registry = DirectiveRegistry::builtin();
        let expected = [
            ("define_variable", 2),
            ("define_library", 1),
            ("define_include", 1),
            ("define_library_path", 1),
            ("add_flag", 1),
            ("compile", 2),
            ("compile_s", 2),
            ("enable_verbose", 0),
            ("win_compiler", 0),
            ("printfn", 1),
            ("eprintfn", 1),
            ("check_tool", 1),
            ("reset_settings", 0),
            ("file_exists", 1),
            ("find_library", 1),
            ("find_flags", 1),
            ("s_command", 1),
            ("set_build_directory", 1),
            ("print_libraries", 0),
            ("clear_build_directory", 0),
            ("generate_build_report_to_file", 1),
            ("generate_timestamp_file", 0),
            ("backup_build_directory", 1),
            ("check_and_install_dependency", 1),
            ("add_memory_sanitizer", 0),
            ("add_compiler_warnings", 0),
            ("send_notification", 3),
            ("list_defined_variables", 0),
            ("list_files_in_directory", 1),
            ("install_dependency", 1),
            ("exit", 1),
            ("remove_variable", 1),
            ("remove_flag", 1),
            ("print_flags", 0),
            ("convert_to_make", 0),
        ];

        assert_eq!(registry.len(), expected.len());
        for (name, arity) in expected {
            let builtin = registry.get(name).unwrap();
            assert_eq!(builtin.arity, arity, "arity of {name}");
        }
    }

    #[test]
    fn test_register_overrides() {
        fn noop(_: &Directive, _: &mut Interpreter) -> Result<Flow, DispatchError> {
            Ok(Flow::Continue)
        }

        let mut registry = DirectiveRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register("noop", 0, noop).is_none());
        assert!(registry.register("noop", 2, noop).is_some());
        assert_eq!(registry.get("noop").map(|b| b.arity), Some(2));
        assert!(registry.get("compile").is_none());
    }
}
