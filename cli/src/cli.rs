use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "sambac")]
#[command(about = "Runs samba build scripts or converts them to Makefiles")]
#[command(disable_version_flag = true)]
pub struct Args {
    /// Print the compiler and language versions
    #[arg(long)]
    pub version: bool,

    /// Print the compiler version only
    #[arg(long = "version_short")]
    pub version_short: bool,

    /// Build script to read
    #[arg(short, long, value_name = "path", default_value = samba::DEFAULT_SCRIPT)]
    pub file: PathBuf,

    /// Write a Makefile instead of running the script
    #[arg(
        long,
        value_name = "path",
        num_args = 0..=1,
        default_missing_value = samba::makefile::DEFAULT_MAKEFILE
    )]
    pub make: Option<PathBuf>,

    /// Increase log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Targets to build (defaults to "default")
    pub targets: Vec<String>,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sambac"]).unwrap();
        assert_eq!(args.file, PathBuf::from("build.samba"));
        assert!(args.targets.is_empty());
        assert!(args.make.is_none());
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_targets_and_flags() {
        let args =
            Args::try_parse_from(["sambac", "-f", "other.samba", "-vv", "release", "debug"]).unwrap();
        assert_eq!(args.file, PathBuf::from("other.samba"));
        assert_eq!(args.targets, ["release", "debug"]);
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_make_output() {
        let args = Args::try_parse_from(["sambac", "--make"]).unwrap();
        assert_eq!(args.make, Some(PathBuf::from("Makefile")));

        let args = Args::try_parse_from(["sambac", "--make=out.mk"]).unwrap();
        assert_eq!(args.make, Some(PathBuf::from("out.mk")));
    }

    #[test]
    fn test_version_flags() {
        assert!(Args::try_parse_from(["sambac", "--version"]).unwrap().version);
        assert!(
            Args::try_parse_from(["sambac", "--version_short"])
                .unwrap()
                .version_short
        );
    }
}
