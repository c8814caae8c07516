use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};
use log::debug;
use samba::os::{self, Path as OsPath};

/// Package managers tried by `install_package`, in order.
const PACKAGE_MANAGERS: &[(&str, &[&str])] = &[
    ("apt-get", &["install", "-y"]),
    ("dnf", &["install", "-y"]),
    ("pacman", &["-S", "--noconfirm"]),
    ("zypper", &["install", "-y"]),
    ("brew", &["install"]),
    ("winget", &["install", "-e", "--id"]),
];

pub struct Sandbox;

impl os::Os for Sandbox {
    fn print(&self, msg: &str) {
        println!("{}", msg);
    }

    fn eprint(&self, msg: &str) {
        eprintln!("{}", msg);
    }

    fn exists(&self, path: &OsPath) -> os::Result<bool> {
        Ok(Path::new(path.as_ref()).exists())
    }
    fn is_dir(&self, path: &OsPath) -> os::Result<bool> {
        Ok(Path::new(path.as_ref()).is_dir())
    }
    fn read_file(&self, path: &OsPath) -> os::Result<Vec<u8>> {
        Ok(fs::read(path.as_ref())?)
    }
    fn write_file(&self, path: &OsPath, data: &[u8]) -> os::Result<()> {
        Ok(fs::write(path.as_ref(), data)?)
    }
    fn create_dir_all(&self, path: &OsPath) -> os::Result<()> {
        Ok(fs::create_dir_all(path.as_ref())?)
    }
    fn remove_dir_all(&self, path: &OsPath) -> os::Result<()> {
        Ok(fs::remove_dir_all(path.as_ref())?)
    }

    fn copy_dir(&self, from: &OsPath, to: &OsPath) -> os::Result<()> {
        copy_dir(Path::new(from.as_ref()), Path::new(to.as_ref()))
    }

    fn list_dir(&self, path: &OsPath) -> os::Result<Vec<String>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path.as_ref())? {
            entries.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(entries)
    }

    fn find_program(&self, name: &str) -> os::Result<OsPath> {
        let path = which::which(name)?;
        Ok(OsPath::from(path.to_string_lossy()))
    }

    fn run_command(&self, cmd: &str, args: &[&str]) -> os::Result<os::RunCommandOutput> {
        debug!("Running command: {} {:?}", cmd, args);

        let output = Command::new(cmd)
            .args(args)
            .output()
            .with_context(|| format!("Failed to start {cmd}"))?;

        Ok(os::RunCommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            returncode: output.status.code().unwrap_or(-1) as i64,
        })
    }

    fn run_shell(&self, command: &str) -> os::Result<i64> {
        debug!("Running shell command: {}", command);

        let mut shell = if cfg!(windows) {
            let mut shell = Command::new("cmd");
            shell.arg("/C");
            shell
        } else {
            let mut shell = Command::new("sh");
            shell.arg("-c");
            shell
        };
        let status = shell
            .arg(command)
            .status()
            .with_context(|| format!("Failed to start shell for `{command}`"))?;
        Ok(status.code().unwrap_or(-1) as i64)
    }

    fn install_package(&self, name: &str) -> os::Result<()> {
        let Some((manager, args)) = PACKAGE_MANAGERS
            .iter()
            .find(|(manager, _)| which::which(manager).is_ok())
        else {
            bail!("No supported package manager found");
        };

        debug!("Installing {} with {}", name, manager);
        let status = Command::new(manager).args(*args).arg(name).status()?;
        if !status.success() {
            bail!("{manager} exited with {status}");
        }
        Ok(())
    }

    fn timestamp(&self) -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs().to_string())
            .unwrap_or_else(|_| "0".into())
    }
}

fn copy_dir(from: &Path, to: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }
    Ok(())
}
