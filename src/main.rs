mod cli;
mod commands;
mod guard;
mod page_range;
mod pdf;
mod style;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    if run(cli.command, &mut stdin.lock(), &mut stdout.lock())? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Returns `false` when the user refused to overwrite an existing output file
fn run<R: BufRead, W: Write>(command: Commands, input: &mut R, out: &mut W) -> Result<bool> {
    if let Some(output) = command.output() {
        if !guard::confirm_overwrite(output, input, out)? {
            return Ok(false);
        }
    }

    match command {
        Commands::Imgs2pdf {
            images,
            output,
            load_truncated,
        } => {
            let options = pdf::images::ImageOptions { load_truncated };
            commands::imgs2pdf::run(&images, &output, &options)?;
        }
        Commands::Join { inputs, output } => {
            commands::join::run(&inputs, &output)?;
        }
        Commands::Pick {
            input,
            pages,
            output,
        } => {
            commands::pick::run(&input, &pages, &output)?;
        }
        Commands::Remove {
            input,
            pages,
            output,
        } => {
            commands::remove::run(&input, &pages, &output)?;
        }
        Commands::Insert {
            input,
            insert,
            page,
            output,
        } => {
            commands::insert::run(&input, &insert, page, &output)?;
        }
        Commands::Scale {
            input,
            page_scales,
            output,
        } => {
            commands::scale::run(&input, &page_scales, &output)?;
        }
        Commands::Rotate {
            input,
            page_angles,
            output,
        } => {
            commands::rotate::run(&input, &page_angles, &output)?;
        }
        Commands::Search {
            input,
            pattern,
            case_insensitive,
        } => {
            let options = commands::search::SearchOptions {
                pattern,
                case_insensitive,
            };
            let highlighter = style::Highlighter::new(console::colors_enabled());
            commands::search::run(&input, &options, &highlighter, out)?;
        }
    }

    Ok(true)
}
