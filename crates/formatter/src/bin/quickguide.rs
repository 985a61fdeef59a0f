// ABOUTME: CLI binary for the quick guide formatter.
// ABOUTME: Converts a Word HTML export into a cleaned fragment, its heading index, or both as JSON.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use quickguide_formatter::Formatter;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "quickguide")]
#[command(about = "Turn a Word \"Save As HTML\" export into an embeddable quick guide")]
struct Args {
    /// Word HTML export (.htm or .html)
    #[arg()]
    input: PathBuf,

    /// Print the heading index as JSON instead of the fragment
    #[arg(long = "headings", conflicts_with = "json_output")]
    headings: bool,

    /// Print fragment and heading index together as JSON
    #[arg(long = "json")]
    json_output: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Deepest heading level to renumber and index
    #[arg(long = "max-heading-level", default_value_t = 20)]
    max_heading_level: u8,

    /// Number of WordSection regions to extract
    #[arg(long = "sections", default_value_t = 5)]
    sections: usize,

    /// Fail on malformed markup instead of recovering
    #[arg(long = "strict")]
    strict: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn render(formatter: &Formatter, args: &Args) -> anyhow::Result<String> {
    if args.headings {
        let headings = formatter.heading_index_file(&args.input)?;
        Ok(serde_json::to_string_pretty(&headings)?)
    } else if args.json_output {
        let guide = formatter.process_file(&args.input)?;
        Ok(guide.to_json()?)
    } else {
        Ok(formatter.run_file(&args.input)?)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let formatter = Formatter::builder()
        .max_heading_level(args.max_heading_level)
        .section_count(args.sections)
        .recover_from_malformed_input(!args.strict)
        .build();

    let start = Instant::now();
    let output_str = match render(&formatter, &args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };
    let elapsed = start.elapsed();

    let mut had_error = false;
    if let Some(output_path) = &args.output {
        if let Err(e) = fs::write(output_path, &output_str) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            had_error = true;
        }
    } else {
        println!("{}", output_str);
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
