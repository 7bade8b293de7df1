//! linesplice: unwrap a marker-delimited block of lines and relocate what follows it.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use linesplice::{config, splice_file, Anchor, RangeSpec, Relocation, SpliceError};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "linesplice")]
#[command(about = "Unwrap a block of lines and relocate what follows it", long_about = None)]
struct Args {
    /// File to transform
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Line of the first opening marker
    #[arg(long)]
    skip_start: usize,

    /// Line of the first closing marker
    #[arg(long)]
    skip_end: usize,

    /// Opening marker lines to drop (overrides config)
    #[arg(long)]
    open_markers: Option<usize>,

    /// Closing marker lines to drop (overrides config)
    #[arg(long)]
    close_markers: Option<usize>,

    /// First line after the block to relocate
    #[arg(long, requires = "anchor_target")]
    block_end: Option<usize>,

    /// Line after which the block is re-inserted
    #[arg(long, group = "anchor_target", requires = "block_end")]
    anchor: Option<usize>,

    /// Re-insert the block after the first surviving line containing this text
    #[arg(long, group = "anchor_target", requires = "block_end")]
    anchor_pattern: Option<String>,

    /// Also drop the line at the block end (the outer closer)
    #[arg(long, requires = "block_end")]
    drop_closer: bool,

    /// Strip up to this many leading spaces from relocated lines
    #[arg(long, default_value_t = 0, requires = "block_end")]
    dedent: usize,

    /// Text the opening marker line must contain
    #[arg(long)]
    expect_open: Option<String>,

    /// Text the closing marker line must contain
    #[arg(long)]
    expect_close: Option<String>,

    /// Interpret line numbers as 1-based, as shown in editors
    #[arg(long)]
    one_based: bool,

    /// Write the result back to PATH (otherwise a dry run)
    #[arg(long, short = 'w')]
    write: bool,

    /// Keep a copy of the original next to PATH when writing
    #[arg(long)]
    backup: bool,

    /// Print the transformed document to stdout
    #[arg(long)]
    print: bool,

    /// Report the summary as JSON
    #[arg(long)]
    json: bool,

    /// Load settings from this file instead of linesplice.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn range_spec(&self, cfg: &config::Config) -> Result<RangeSpec, SpliceError> {
        let mut spec = RangeSpec::new(self.skip_start, self.skip_end)
            .markers(
                self.open_markers.unwrap_or(cfg.open_markers),
                self.close_markers.unwrap_or(cfg.close_markers),
            )
            .guard(self.expect_open.clone(), self.expect_close.clone());

        if let Some(block_end) = self.block_end {
            let anchor = match self.anchor {
                Some(line) => Anchor::Line(line),
                None => Anchor::Pattern(self.anchor_pattern.clone().unwrap_or_default()),
            };
            spec = spec.relocate(
                Relocation::new(block_end, anchor)
                    .drop_closer(self.drop_closer)
                    .dedent(self.dedent),
            );
        }

        if self.one_based {
            spec.into_zero_based()
        } else {
            Ok(spec)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), SpliceError> {
    let cfg = config::Config::load(args.config.as_deref())?;
    let spec = args.range_spec(&cfg)?;
    let backup = (args.backup || cfg.backup).then_some(cfg.backup_suffix.as_str());

    let (document, summary) = splice_file(&args.path, &spec, args.write, backup)?;
    if !args.write {
        tracing::info!("dry run, pass --write to persist");
    }

    let report = if args.json {
        serde_json::to_string_pretty(&summary).map_err(|e| SpliceError::WriteFailed {
            path: PathBuf::from("<stdout>"),
            source: io::Error::other(e),
        })?
    } else {
        summary.to_string()
    };

    if args.print {
        print!("{}", document.render());
        eprintln!("{report}");
    } else {
        println!("{report}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
