use anyhow::Result;
use clap::Parser;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands::{self, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let ctx = Context::load(&cli)?;
    match cli.command {
        Commands::New(args) => commands::new_command(&ctx, args),
        Commands::Import => commands::import_command(&ctx),
        Commands::Contacts(args) => commands::contacts_command(args),
        Commands::Edit(args) => commands::edit_command(&ctx, args),
        Commands::Tree(args) => commands::tree_command(&ctx, args),
        Commands::Config(args) => commands::config_command(&ctx, args),
    }
}

/// `RUST_LOG` wins; otherwise `-v` and `-q` pick the default level
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
