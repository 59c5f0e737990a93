use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use jackc::fileio::{input, output};

/// Compile Jack classes to Hack VM code.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// A `.jack` file, or a directory whose `.jack` files are all compiled
    input: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(&Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Compile every source, returning whether all of them compiled.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let sources = input::discover(&cli.input)
        .with_context(|| format!("Reading {}", cli.input.display()))?;

    let mut all_compiled = true;

    for source_path in sources {
        let source = input::SourceFile::load(&source_path)
            .with_context(|| format!("Reading {}", source_path.display()))?;

        match jackc::compile(source.content()) {
            Ok(module) => {
                let output_path = output::vm_path(source.path());
                output::write_vm(&output_path, &module)
                    .with_context(|| format!("Writing {}", output_path.display()))?;

                log::info!("Wrote {}", output_path.display());
            }
            Err(error) => {
                jackc::error::report(
                    source.path().to_string_lossy().as_ref(),
                    source.content(),
                    &error,
                )?;
                all_compiled = false;
            }
        }
    }

    Ok(all_compiled)
}
