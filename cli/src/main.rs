mod script;

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use clap::{ArgAction, Parser, ValueEnum};
use field_schema::constants::DEFAULT_INDENT_STEP;
use field_schema::{Indent, Session, SessionOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fschema", version, about = "Build a nested field schema from a command script")]
struct Args {
    /// Script path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// JSON indentation size, 0 for compact output (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Display margin added per nesting level (default: 30).
    #[arg(long = "indent-step", alias = "indentStep", value_name = "number", default_value_t = DEFAULT_INDENT_STEP)]
    indent_step: u32,

    /// What to print: the JSON document, the forest snapshot, or a text outline.
    #[arg(long, value_enum, value_name = "format", default_value_t = Format::Document)]
    format: Format,

    /// Exit with an error if any request raised an error notification.
    #[arg(long)]
    strict: bool,

    /// Log mutations to stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Document,
    Forest,
    Outline,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input = read_input(args.input.as_deref())?;
    let steps = script::parse(&input)?;

    let options = SessionOptions::new()
        .with_indent_step(args.indent_step)
        .with_json_indent(Indent::Spaces(args.indent));
    let mut session = Session::with_options(options);

    let mut errors = 0usize;
    for step in steps {
        for note in session.dispatch(step.request) {
            errors += 1;
            eprintln!("{}  line {}: {}", note.severity.as_str().to_ascii_uppercase(), step.line, note.message);
        }
    }
    tracing::debug!(fields = session.len(), errors, "script finished");

    let rendered = match args.format {
        Format::Document => session.document_json()?,
        Format::Forest => session.forest_json()?,
        Format::Outline => session.outline(),
    };
    write_output(args.output.as_deref(), rendered.as_bytes())?;
    if let Some(path) = args.output.as_deref().filter(|path| *path != "-") {
        println!("✔ Wrote {} fields → {path}", session.len());
    }

    if args.strict && errors > 0 {
        return Err(format!("{errors} request(s) raised errors").into());
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) if path != "-" => {
            fs::write(path, data)?;
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
        }
    }
    Ok(())
}
