//! giftoframes - Main Entry Point

use std::process::ExitCode;

use gtf_cli::{logging, Config, USAGE};

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<ExitCode> {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            return Ok(ExitCode::from(2));
        }
    };

    if config.show_help {
        print!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    logging::init(config.log_filter.as_deref())?;
    tracing::info!("Converting {}", config.input.display());

    let report = gtf_cli::run(&config)?;

    println!("{}", report.summary);
    if !report.written.is_empty() {
        println!();
        for path in &report.written {
            println!("  {}", path.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
