use clap::Parser;
use miette::Result;
use spc::cli::{Cli, Commands, RunContext};
use spc::core::{logging, Config};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    // Broken discovered files are skipped; everything else must load
    let (config, skipped) = Config::load_from(cli.global.config.as_deref())?;

    let color = config.output.color && !cli.global.no_color;
    if !color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    logging::init(cli.global.verbose, &config.log_level, color);
    for e in &skipped {
        tracing::warn!(error = %e, "config file skipped");
    }

    let ctx = RunContext::new(&cli.global, config);

    match cli.command {
        Commands::Report(args) => spc::cli::commands::report::run(args, &ctx),
        Commands::Charts(args) => spc::cli::commands::charts::run(args, &ctx),
        Commands::Points(args) => spc::cli::commands::points::run(args, &ctx),
        Commands::Curve(args) => spc::cli::commands::curve::run(args, &ctx),
        Commands::Classify(args) => spc::cli::commands::classify::run(args, &ctx),
        Commands::Completions(args) => spc::cli::commands::completions::run(args),
    }
}
