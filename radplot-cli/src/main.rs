use clap::Parser;
use miette::Result;
use radplot_cli::Cli;

fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    radplot_cli::run(args)?;
    Ok(())
}
