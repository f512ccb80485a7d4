use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use log::info;

use maze_carver::{Config, Session};

const DEFAULT_DELAY_MS: u64 = 20;

#[derive(Debug)]
struct Options {
    config: Config,
    stepping: bool,
    delay: Duration,
}

fn parse_value<T>(flag: &str, value: Option<&String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = match value {
        Some(value) => value,
        None => bail!("{} needs a value", flag),
    };
    value
        .parse()
        .with_context(|| format!("invalid value for {}: '{}'", flag, value))
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut config = Config::default();
    let mut stepping = false;
    let mut delay = Duration::from_millis(DEFAULT_DELAY_MS);
    let mut dims = Vec::new();

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--step" => stepping = true,
            "--seed" => config.seed = Some(parse_value(arg, args.next())?),
            "--threshold" => config.recursion_threshold = parse_value(arg, args.next())?,
            "--delay" => delay = Duration::from_millis(parse_value(arg, args.next())?),
            flag if flag.starts_with("--") => bail!("unknown option {}", flag),
            _ => dims.push(parse_value::<usize>("dimension", Some(arg))?),
        }
    }

    match dims.as_slice() {
        [] => {}
        [width] => config.width = *width,
        [width, height] => {
            config.width = *width;
            config.height = *height;
        }
        _ => bail!("expected at most two dimensions, got {}", dims.len()),
    }
    config.validate()?;

    Ok(Options {
        config,
        stepping,
        delay,
    })
}

fn print_usage(program_name: &str) {
    eprintln!(
        "Usage: {} [WIDTH] [HEIGHT] [--step] [--seed N] [--delay MS] [--threshold N]",
        program_name
    );
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} 30 20            # carve a 30x20 maze", program_name);
    eprintln!("  {} 12 8 --step      # watch it being carved", program_name);
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program_name = args.get(0).map(|s| s.as_str()).unwrap_or("maze-carver");

    let parsed = parse_args(args.get(1..).unwrap_or(&[]))
        .and_then(|options| Ok((Session::new(options.config.clone())?, options)));
    let (mut session, options) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if options.stepping {
        while session.step() {
            // clear screen, cursor home
            write!(out, "\x1b[2J\x1b[H{}", session.grid())?;
            out.flush()?;
            thread::sleep(options.delay);
        }
        write!(out, "\x1b[2J\x1b[H{}", session.grid())?;
        info!(
            "{} steps, {:?} spent carving",
            session.steps_taken(),
            session.last_generation_time().unwrap_or_default()
        );
    } else {
        write!(out, "{}", session.generate())?;
    }

    out.flush()?;
    Ok(())
}
