extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate shlex;
extern crate typo_weight;

use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use typo_weight::prelude::*;

/// Rank candidate lines by how well they match a typed query, typos included
#[derive(Parser, Debug)]
#[command(name = "tw", version, about)]
struct Cli {
    /// Query to score the candidates against
    query: String,

    /// Read candidates from a file instead of stdin
    #[arg(short, long, help_heading = "Input/Output")]
    input: Option<PathBuf>,

    /// Print the weight before each line
    #[arg(long, help_heading = "Input/Output")]
    print_weight: bool,

    /// Print at most this many lines
    #[arg(short = 'n', long, help_heading = "Input/Output")]
    limit: Option<usize>,

    /// Print output delimited by ASCII NUL characters
    #[arg(long, help_heading = "Input/Output")]
    print0: bool,

    #[command(flatten)]
    analysis: AnalyzerOptions,
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if let Some(io) = err.downcast_ref::<std::io::Error>()
                && io.kind() == std::io::ErrorKind::BrokenPipe
            {
                std::process::exit(0)
            }
            eprintln!("{err:?}");
            std::process::exit(2)
        }
    }
}

/// Arguments from `TW_DEFAULT_OPTIONS` come before the command line ones
fn parse_args() -> Cli {
    let mut args: Vec<String> = env::args().take(1).collect();
    args.extend(
        env::var("TW_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));
    Cli::parse_from(args)
}

fn read_candidates(input: Option<&PathBuf>) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = File::open(path).wrap_err_with(|| format!("cannot open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(std::io::stdin())),
    };
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}

fn real_main() -> Result<i32> {
    color_eyre::install()?;
    let cli = parse_args();
    debug!("options: {cli:?}");

    let candidates = read_candidates(cli.input.as_ref())?;
    let analyzer = Analyzer::new(cli.analysis.clone());
    let outputs = analyzer.analyze_all(&cli.query, &candidates)?;
    info!("{} of {} candidates accepted", outputs.len(), candidates.len());

    let ending = if cli.print0 { "\0" } else { "\n" };
    let mut stdout = BufWriter::new(std::io::stdout().lock());
    for output in outputs.iter().take(cli.limit.unwrap_or(usize::MAX)) {
        if cli.print_weight {
            write!(stdout, "{:.4}\t", output.weight())?;
        }
        write!(stdout, "{}{ending}", output.text())?;
    }
    stdout.flush()?;

    Ok(if outputs.is_empty() { 1 } else { 0 })
}
