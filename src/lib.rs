//! Lapse - A human-readable duration parser
//!
//! This library provides:
//! - Parsing of clock notation (`1:30`, `1.12:13:14`) and unit-suffixed
//!   notation (`5m`, `2d3h4m5s`, `10 seconds`), mixed freely in prose
//! - A tick-based signed `Duration` with a canonical rendering
//! - Prefix and keyword routing (`wait 5m now`)
//! - The `lapse` command line and its `~/.lapse/rc` configuration
//!
//! # Example
//!
//! ```
//! use lapse::models::Duration;
//! use lapse::parse::{parse_with, ParseOptions};
//! use lapse::models::Unit;
//!
//! let options = ParseOptions::default().with_coloned_default(Unit::Minutes);
//! assert_eq!(parse_with("1:30", &options).unwrap(), Duration::from_seconds(90));
//! ```

pub mod cli;
pub mod config;
pub mod models;
pub mod parse;
