use clap::{Args, Parser, Subcommand};
use anyhow::{bail, Context, Result};
use log::debug;

use crate::config::Config;
use crate::models::Unit;
use crate::parse::{parse_many, parse_prefixed, parse_with, DecimalStyle, ParseOptions};
use crate::cli::output::{
    duration_json, format_duration_line, format_duration_list, format_elapses_at_local,
    format_prefixed_table, prefixed_json,
};

#[derive(Parser)]
#[command(name = "lapse")]
#[command(about = "Lapse - Parse human-readable durations like 1:30, 1.5h or 2d3h4m5s")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(flatten)]
    pub parser: ParserArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the defaults in ~/.lapse/rc
#[derive(Args, Debug, Default)]
pub struct ParserArgs {
    /// Unit of the first column of clock notation (e.g. hours, minutes)
    #[arg(long, global = true)]
    pub coloned_default: Option<Unit>,
    /// Unit for bare numbers without a suffix
    #[arg(long, global = true)]
    pub uncoloned_default: Option<Unit>,
    /// Fail when any number cannot be given a unit
    #[arg(long, global = true)]
    pub fail_on_unitless: bool,
    /// Merge units in any order instead of splitting at a coarser unit
    #[arg(long, global = true)]
    pub no_strict_order: bool,
    /// Decimal separator
    #[arg(long, global = true)]
    pub decimal: Option<char>,
    /// Digit group separator
    #[arg(long, global = true)]
    pub group: Option<char>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse the first duration in the text
    Parse {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Also show the local time at which the duration elapses
        #[arg(long)]
        at: bool,
        /// Text to parse (e.g. "1h 30m", "-1:30")
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Parse every duration in the text
    Many {
        /// Stop after this many durations
        #[arg(long)]
        max: Option<usize>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Text to parse (e.g. "5m 10h")
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Route durations to the words in front of them
    Prefixed {
        /// Word whose following duration is reported under its name (repeatable)
        #[arg(long = "prefix")]
        prefixes: Vec<String>,
        /// Word reported as a flag when present (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Text to parse (e.g. "wait 5m then retry")
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let options = Config::load()?;
    let options = apply_overrides(options, &cli.parser);
    debug!("parser options: {:?}", options);
    handle_command(cli.command, &options)
}

/// Layer command-line flags over the configured options
pub fn apply_overrides(mut options: ParseOptions, args: &ParserArgs) -> ParseOptions {
    if let Some(unit) = args.coloned_default {
        options.coloned_default = unit;
    }
    if let Some(unit) = args.uncoloned_default {
        options.uncoloned_default = unit;
    }
    if args.fail_on_unitless {
        options.fail_on_unitless_number = true;
    }
    if args.no_strict_order {
        options.strict_big_to_small = false;
    }
    if args.decimal.is_some() || args.group.is_some() {
        let style = options.decimal_style;
        options.decimal_style = DecimalStyle::new(
            args.decimal.unwrap_or(style.decimal_separator),
            args.group.or(style.group_separator),
        );
    }
    options
}

fn handle_command(command: Commands, options: &ParseOptions) -> Result<()> {
    match command {
        Commands::Parse { json, at, text } => handle_parse(&text.join(" "), json, at, options),
        Commands::Many { max, json, text } => handle_many(&text.join(" "), max, json, options),
        Commands::Prefixed { prefixes, keywords, json, text } => {
            handle_prefixed(&text.join(" "), &prefixes, &keywords, json, options)
        }
    }
}

fn handle_parse(text: &str, json: bool, at: bool, options: &ParseOptions) -> Result<()> {
    let duration = parse_with(text, options)
        .with_context(|| format!("Could not parse '{}'", text))?;

    let elapses_at = if at {
        match format_elapses_at_local(&duration) {
            Some(when) => Some(when),
            None => bail!("{} from now is out of range", duration),
        }
    } else {
        None
    };

    if json {
        let mut value = duration_json(text, &duration);
        if let Some(when) = elapses_at {
            value["elapses_at"] = serde_json::Value::String(when);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", format_duration_line(&duration));
        if let Some(when) = elapses_at {
            println!("Elapses at {}", when);
        }
    }
    Ok(())
}

fn handle_many(text: &str, max: Option<usize>, json: bool, options: &ParseOptions) -> Result<()> {
    let durations = parse_many(text, options, max.unwrap_or(usize::MAX))
        .with_context(|| format!("Could not parse '{}'", text))?;

    if json {
        let values: Vec<_> = durations.iter().map(|d| duration_json(text, d)).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        println!("{}", format_duration_list(&durations));
    }
    Ok(())
}

fn handle_prefixed(
    text: &str,
    prefixes: &[String],
    keywords: &[String],
    json: bool,
    options: &ParseOptions,
) -> Result<()> {
    let prefixes: Vec<&str> = prefixes.iter().map(String::as_str).collect();
    let keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
    let map = parse_prefixed(text, &prefixes, &keywords, options)
        .with_context(|| format!("Could not parse '{}'", text))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&prefixed_json(text, &map))?);
    } else {
        println!("{}", format_prefixed_table(&map));
    }
    Ok(())
}
