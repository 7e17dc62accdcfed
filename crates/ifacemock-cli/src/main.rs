use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use ifacemock::{generate, load_options, load_packages, to_json, write_files, Target};

const AFTER_HELP: &str = "\
When the positional interface argument is omitted, every interface annotated
with a \"go:mock [output file]\" directive is extracted and printed to stdout
or, with -w, written next to its output path as <output path>.json. A directive
without an output file uses -o when given, else <source>_mock.go.

When an interface name is given, only that interface is extracted and the
package data must hold exactly one package. -w is not accepted in that mode;
the IR is written to <-o>.json when -o is given.";

#[derive(Parser)]
#[command(name = "ifacemock")]
#[command(about = "Extract mock-ready interface IR from type-checked packages", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Loader output to read packages from (JSON, or YAML by extension)
    #[arg(short = 'd', long = "data", default_value = "packages.json")]
    data: PathBuf,

    /// Options file
    #[arg(short, long, env = "IFACEMOCK_CONFIG")]
    config: Option<PathBuf>,

    /// Output file for directives without one, or the output key in
    /// single-interface mode
    #[arg(short, long)]
    output: Option<String>,

    /// Write IR files rather than printing to stdout
    #[arg(short, long)]
    write: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Extract only this interface
    interface: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.debug {
        tracing::Level::TRACE
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(cli.debug) // Show target module in debug mode
        .with_writer(std::io::stderr)
        .init();

    let packages = load_packages(&cli.data)?;

    let (target, write) = match &cli.interface {
        None => (Target::Annotated, cli.write),
        Some(name) => {
            if cli.write {
                bail!("The -w option is only permitted when generating all mocks");
            }
            let output = cli.output.clone().unwrap_or_default();
            let write = !output.is_empty();
            (
                Target::Interface {
                    name: name.clone(),
                    output: PathBuf::from(output),
                },
                write,
            )
        }
    };

    let default_output = match target {
        Target::Annotated => cli.output.as_deref(),
        Target::Interface { .. } => None,
    };
    let options = load_options(cli.config.as_deref(), default_output)?;

    let files = generate(&packages, &options, &target)?;
    info!("Generated {} mock file(s)", files.len());

    if write {
        write_files(&files)?;
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", to_json(&files)?)?;
    }
    Ok(())
}
