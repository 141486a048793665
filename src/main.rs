//! `diagram-batch`: clone crates, render diagrams, build an index

use clap::Parser;

use diagram_batch::cli::args::Cli;
use diagram_batch::error::ExitCode;
use diagram_batch::observability::init_logging;

fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match diagram_batch::run(&cli.run_options()) {
        Ok(summary) => {
            if !cli.quiet {
                println!(
                    "\nFinished. Diagrams are in {}",
                    summary.output_dir.display()
                );
            }
            std::process::exit(ExitCode::SUCCESS);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
