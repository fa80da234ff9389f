#![forbid(unsafe_code)]

//! Command-line argument parsing for the easel binary.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `EASEL_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Easel — networked drawing canvas

USAGE:
    easel [OPTIONS]

OPTIONS:
    --listen=ADDR   Command listener address (default: 127.0.0.1:17000)
    --width=N       Canvas width in pixels (default: 800)
    --height=N      Canvas height in pixels (default: 800)
    --headless      No terminal front end; loop + listener only
    --help, -h      Show this help message
    --version, -V   Show version

ENVIRONMENT:
    EASEL_LISTEN, EASEL_WIDTH, EASEL_HEIGHT, EASEL_HEADLESS
    override the defaults; command-line flags win over both.

PROTOCOL:
    POST a line-delimited command script to the listener address:
        white | green | reset | update
        bgrect <x1> <y1> <x2> <y2>   (unit interval)
        figure <x> <y>               (unit interval)
        move <dx> <dy>               (unrestricted)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub listen: String,
    pub width: u32,
    pub height: u32,
    pub headless: bool,
}

impl Opts {
    pub fn parse() -> Opts {
        Opts::from_args(env::args().skip(1))
    }

    fn from_env() -> Opts {
        Opts {
            listen: env::var("EASEL_LISTEN").unwrap_or_else(|_| "127.0.0.1:17000".to_string()),
            width: env_u32("EASEL_WIDTH", 800),
            height: env_u32("EASEL_HEIGHT", 800),
            headless: env::var("EASEL_HEADLESS").is_ok_and(|v| env_flag(&v)),
        }
    }

    fn from_args(args: impl Iterator<Item = String>) -> Opts {
        let mut opts = Opts::from_env();
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("easel {VERSION}");
                    process::exit(0);
                }
                "--headless" => opts.headless = true,
                _ => {
                    if let Some(v) = arg.strip_prefix("--listen=") {
                        opts.listen = v.to_string();
                    } else if let Some(v) = arg.strip_prefix("--width=") {
                        opts.width = require_u32("--width", v);
                    } else if let Some(v) = arg.strip_prefix("--height=") {
                        opts.height = require_u32("--height", v);
                    } else {
                        eprintln!("unknown option: {arg}");
                        eprintln!("run `easel --help` for usage");
                        process::exit(2);
                    }
                }
            }
        }
        opts
    }
}

fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn require_u32(flag: &str, value: &str) -> u32 {
    match value.parse() {
        Ok(n) if n > 0 => n,
        _ => {
            eprintln!("invalid value for {flag}: {value}");
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let opts = Opts::from_args(
            [
                "--listen=0.0.0.0:9000".to_string(),
                "--width=320".to_string(),
                "--height=240".to_string(),
                "--headless".to_string(),
            ]
            .into_iter(),
        );
        assert_eq!(opts.listen, "0.0.0.0:9000");
        assert_eq!(opts.width, 320);
        assert_eq!(opts.height, 240);
        assert!(opts.headless);
    }

    #[test]
    fn env_flag_values() {
        assert!(env_flag("1"));
        assert!(env_flag(" true "));
        assert!(!env_flag("0"));
        assert!(!env_flag("nope"));
    }
}
