use std::process;
use std::time::Instant;

use samba::Samba;

mod cli;
mod runtime;

use runtime::Sandbox;

fn main() -> anyhow::Result<()> {
    let args = cli::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    if args.version {
        println!("{}", samba::version_banner());
        return Ok(());
    }
    if args.version_short {
        println!("{}", samba::version_short());
        return Ok(());
    }

    let samba = Samba::new(Sandbox);
    let script = args.file.to_string_lossy();

    if let Some(makefile) = &args.make {
        samba.translate(&script, makefile.to_string_lossy())?;
        return Ok(());
    }

    let start = Instant::now();
    let summary = samba.run(&script, args.targets)?;
    if let Some(code) = summary.exit_code {
        process::exit(code);
    }

    println!(
        "Build completed in {:.2} seconds.",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
