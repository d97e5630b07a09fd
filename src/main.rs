// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wesplit::{calculate, Settings, TipSelection, TotalsView, TIP_PERCENTAGES};

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config_path = take_config_flag(&mut args)?;
    // Log only outside the TUI so output never lands on the alternate screen
    if !args.is_empty() {
        init_logging();
    }
    let settings = Settings::load(config_path.as_deref())?;

    match args.first().map(String::as_str) {
        None => run_ui_mode(&settings)?,
        Some("split") => run_split(&args[1..], &settings)?,
        Some("tips") => run_tips(),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }

    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Remove `--config <path>` from the argument list
fn take_config_flag(args: &mut Vec<String>) -> Result<Option<PathBuf>> {
    let Some(i) = args.iter().position(|a| a == "--config") else {
        return Ok(None);
    };
    if i + 1 >= args.len() {
        bail!("--config needs a file path");
    }
    let path = PathBuf::from(args.remove(i + 1));
    args.remove(i);
    Ok(Some(path))
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  wesplit [--config <file>]                          open the form");
    eprintln!("  wesplit split <amount> <people> [tip-index]        print the split");
    eprintln!("  wesplit tips                                       list tip options");
}

/// `<amount> <people> [tip-index]`, or `None` on a wrong argument count
fn split_args(args: &[String]) -> Option<(&str, &str, Option<&str>)> {
    match args {
        [amount, people] => Some((amount.as_str(), people.as_str(), None)),
        [amount, people, tip] => Some((amount.as_str(), people.as_str(), Some(tip.as_str()))),
        _ => None,
    }
}

/// Lines printed by `wesplit split`
fn split_report(amount: &str, people: &str, tip: Option<&str>, settings: &Settings) -> Result<Vec<String>> {
    let tip = match tip {
        Some(raw) => raw
            .parse::<TipSelection>()
            .with_context(|| format!("Invalid tip index {:?}", raw))?,
        None => settings.default_tip(),
    };

    let totals = calculate(amount, people, tip);
    let view = TotalsView::new(&totals, &settings.currency_symbol);

    let mut lines = vec![format!("Tip percentage: {}", tip)];
    lines.extend(view.lines().iter().map(|(label, value)| format!("{}: {}", label, value)));
    Ok(lines)
}

fn run_split(args: &[String], settings: &Settings) -> Result<()> {
    let Some((amount, people, tip)) = split_args(args) else {
        print_usage();
        std::process::exit(2);
    };

    for line in split_report(amount, people, tip, settings)? {
        println!("{}", line);
    }

    Ok(())
}

fn run_tips() {
    for (index, percentage) in TIP_PERCENTAGES.iter().enumerate() {
        println!("{}  {}%", index, percentage);
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(settings: &Settings) -> Result<()> {
    let mut app = ui::App::new(settings);
    ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_settings: &Settings) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or print a split: wesplit split <amount> <people> [tip-index]");
    std::process::exit(1);
}
