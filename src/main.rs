use anyhow::{Context, Result};
use clap::Parser;
use keypad::calculator::{Calculator, Key, Tape, copy_to_clipboard, group_thousands, tokenize};
use keypad::config::{self, Config};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Four-function keypad calculator.
///
/// Keys are digits, `.`, `+ - * / =`, `%`, `sqrt`, `+/-` (or `neg`) and
/// `C` (or `clear`). Without KEYS, reads key lines from stdin.
#[derive(Parser, Debug)]
#[command(name = "keypad", version, about)]
struct Args {
    /// Key presses, e.g. `5 + 3 =` or `5+3=`
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print results with thousand separators
    #[arg(long)]
    group: bool,

    /// Print the display after every key
    #[arg(long)]
    trace: bool,

    /// Print the session tape as JSON
    #[arg(long, conflicts_with = "trace")]
    json: bool,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,
}

/// Output preferences resolved from flags and config.
struct Output {
    group: bool,
    trace: bool,
    /// Only the JSON tape is printed, at the end.
    quiet: bool,
}

impl Output {
    fn render(&self, display: &str) -> String {
        if self.group {
            group_thousands(display)
        } else {
            display.to_string()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let output = Output {
        group: args.group || config.display.group_thousands,
        trace: args.trace,
        quiet: args.json,
    };

    let mut calc = Calculator::new();
    // Only kept when it will be printed
    let mut tape = args.json.then(Tape::new);

    if args.keys.is_empty() {
        run_interactive(&mut calc, tape.as_mut(), &output)?;
    } else {
        let input = args.keys.join(" ");
        let keys = tokenize(&input).with_context(|| format!("Invalid keys: {}", input))?;
        debug!(count = keys.len(), "running key sequence");

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for key in keys {
            let display = press(&mut calc, tape.as_mut(), key);
            if output.trace {
                writeln!(out, "{} -> {}", key, output.render(display))?;
            }
        }

        if !output.trace && !output.quiet {
            writeln!(out, "{}", output.render(calc.display()))?;
        }
    }

    if let Some(tape) = &tape {
        println!("{}", tape.to_json()?);
    }

    if args.copy || config.clipboard.copy_result {
        // The result is already printed; a clipboard failure is not fatal
        if let Err(e) = copy_to_clipboard(calc.display()) {
            warn!("{:#}", e);
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config::default_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };
    Ok(Config::load(&path)?)
}

/// Press `key`, recording it on the tape if there is one.
fn press<'a>(calc: &'a mut Calculator, tape: Option<&mut Tape>, key: Key) -> &'a str {
    match tape {
        Some(tape) => tape.press(calc, key),
        None => calc.press(key),
    }
}

/// Feed stdin to one engine line by line, printing the display after each line.
fn run_interactive(
    calc: &mut Calculator,
    mut tape: Option<&mut Tape>,
    output: &Output,
) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !output.quiet {
        writeln!(out, "{}", output.render(calc.display()))?;
    }
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let keys = match tokenize(&line) {
            Ok(keys) => keys,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };

        for key in keys {
            let display = press(calc, tape.as_deref_mut(), key);
            if output.trace {
                writeln!(out, "{} -> {}", key, output.render(display))?;
            }
        }
        if !output.trace && !output.quiet {
            writeln!(out, "{}", output.render(calc.display()))?;
        }
        out.flush()?;
    }

    Ok(())
}
