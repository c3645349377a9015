use anyhow::Result;
use clap::Parser;
use tracing::error;

use followee::args::Args;
use followee::opener::{BrowserOpener, LinkOpener, PrintOpener};
use followee::pipeline::{print_run_summary, run_follow_audit};
use followee::prompt::{AutoResume, Checkpoint, ConsolePrompt};
use followee::utils::{setup_logging, validate_args};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    validate_args(&args)?;

    let checkpoint: Box<dyn Checkpoint> = if args.yes {
        Box::new(AutoResume)
    } else {
        Box::new(ConsolePrompt)
    };

    let opener: Box<dyn LinkOpener> = if args.dry_run {
        Box::new(PrintOpener)
    } else {
        Box::new(BrowserOpener)
    };

    match run_follow_audit(&args, checkpoint.as_ref(), opener.as_ref()) {
        Ok(summary) => {
            print_run_summary(&summary);
            Ok(())
        }
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
