mod archive;
mod args;
mod context;
mod error;
mod log;
mod result;
mod target;
mod utils;

use args::Args;
use context::Context;
use log::{Console, Reporter};

fn main() {
    let mut console = Console;
    if let Err(e) = run(&mut console) {
        console.error(&format!("Issue with compress: {}", e));
        std::process::exit(1);
    }
}

fn run(log: &mut dyn Reporter) -> result::Result<()> {
    let args = Args::parse();

    cliclack::intro("ziptree")?;

    args.validate()?;
    args.print(log);

    let ctx = Context::new(args.verbose);
    let archive_path = archive::build(&ctx, log, &args.source_path, &args.destination)?;

    cliclack::outro(format!("Archive created: {}", archive_path.display()))?;
    Ok(())
}
