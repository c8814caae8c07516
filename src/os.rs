use alloc::string::String;
use alloc::vec::Vec;

pub use crate::path::Path;

pub type Result<T> = anyhow::Result<T>;

pub struct RunCommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub returncode: i64,
}

/// Host services needed by build script actions.
///
/// The interpreter never touches the file system, the console or other
/// processes directly; everything goes through this trait so that the
/// language core stays `no_std` and can be driven by a fake host in tests.
pub trait Os: 'static {
    // console
    fn print(&self, msg: &str);
    fn eprint(&self, msg: &str);

    // fs
    fn exists(&self, path: &Path) -> Result<bool>;
    fn is_dir(&self, path: &Path) -> Result<bool>;
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// Recursively copies the directory `from` into `to`, creating `to` if needed.
    fn copy_dir(&self, from: &Path, to: &Path) -> Result<()>;
    /// File names (not full paths) of the entries in `path`.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>>;

    // process
    fn find_program(&self, name: &str) -> Result<Path>;
    fn run_command(&self, cmd: &str, args: &[&str]) -> Result<RunCommandOutput>;
    /// Runs `command` through the host shell, letting it share the console.
    /// Returns the exit status.
    fn run_shell(&self, command: &str) -> Result<i64>;
    /// Installs a package with whatever package manager the host provides.
    fn install_package(&self, name: &str) -> Result<()>;

    // clock
    fn timestamp(&self) -> String;
}
