#![forbid(unsafe_code)]

//! The command grammar.
//!
//! One command per line, case-sensitive keyword first, whitespace-delimited
//! arguments after it. Runs of whitespace collapse; leading and trailing
//! whitespace is ignored. Every failure mode is a distinct error kind
//! carrying the offending command or token.
//!
//! ```text
//! white
//! green
//! reset
//! update
//! bgrect <x1> <y1> <x2> <y2>      # each in [0, 1]
//! figure <x> <y>                  # each in [0, 1]
//! move <dx> <dy>                  # unrestricted
//! ```

use std::error::Error;
use std::fmt;

use easel_render::color::Rgba;
use easel_runtime::op::Op;

/// Why a command line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Empty or whitespace-only line.
    Empty,
    /// First token is not a known command keyword.
    UnknownCommand(String),
    /// Known command with the wrong number of arguments.
    WrongArity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    /// Argument that does not parse as a number.
    InvalidNumber {
        command: &'static str,
        token: String,
    },
    /// Numeric argument outside the unit interval.
    OutOfRange {
        command: &'static str,
        token: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command line"),
            ParseError::UnknownCommand(token) => write!(f, "unknown command: {token}"),
            ParseError::WrongArity { command, expected, found } => {
                write!(f, "{command} takes {expected} argument(s), found {found}")
            }
            ParseError::InvalidNumber { command, token } => {
                write!(f, "invalid number for {command}: {token}")
            }
            ParseError::OutOfRange { command, token } => {
                write!(f, "argument out of range [0, 1] for {command}: {token}")
            }
        }
    }
}

impl Error for ParseError {}

/// Parses one command line into an operation.
pub fn parse(line: &str) -> Result<Op, ParseError> {
    let mut fields = line.split_whitespace();
    let Some(command) = fields.next() else {
        return Err(ParseError::Empty);
    };
    let args: Vec<&str> = fields.collect();

    match command {
        "white" => {
            expect_arity("white", &args, 0)?;
            Ok(Op::SetBackground(Rgba::WHITE))
        }
        "green" => {
            expect_arity("green", &args, 0)?;
            Ok(Op::SetBackground(Rgba::GREEN))
        }
        "reset" => {
            expect_arity("reset", &args, 0)?;
            Ok(Op::Reset)
        }
        "update" => {
            expect_arity("update", &args, 0)?;
            Ok(Op::Refresh)
        }
        "bgrect" => {
            let [x1, y1, x2, y2] = unit_args("bgrect", &args)?;
            Ok(Op::SetBackgroundRect { x1, y1, x2, y2 })
        }
        "figure" => {
            let [x, y] = unit_args("figure", &args)?;
            Ok(Op::AddFigure { x, y })
        }
        "move" => {
            let [dx, dy] = float_args("move", &args)?;
            Ok(Op::Move { dx, dy })
        }
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn expect_arity(command: &'static str, args: &[&str], expected: usize) -> Result<(), ParseError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseError::WrongArity {
            command,
            expected,
            found: args.len(),
        })
    }
}

/// N numeric arguments, unrestricted range.
fn float_args<const N: usize>(
    command: &'static str,
    args: &[&str],
) -> Result<[f64; N], ParseError> {
    expect_arity(command, args, N)?;
    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = token.parse().map_err(|_| ParseError::InvalidNumber {
            command,
            token: (*token).to_string(),
        })?;
    }
    Ok(out)
}

/// N numeric arguments, each required to lie in the unit interval.
fn unit_args<const N: usize>(
    command: &'static str,
    args: &[&str],
) -> Result<[f64; N], ParseError> {
    let values = float_args::<N>(command, args)?;
    for (value, token) in values.iter().zip(args) {
        if !(0.0..=1.0).contains(value) {
            return Err(ParseError::OutOfRange {
                command,
                token: (*token).to_string(),
            });
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_arg_commands() {
        assert_eq!(parse("white"), Ok(Op::SetBackground(Rgba::WHITE)));
        assert_eq!(parse("green"), Ok(Op::SetBackground(Rgba::GREEN)));
        assert_eq!(parse("reset"), Ok(Op::Reset));
        assert_eq!(parse("update"), Ok(Op::Refresh));
    }

    #[test]
    fn bgrect_parses_in_unit_interval() {
        assert_eq!(
            parse("bgrect 0.1 0.2 0.8 0.9"),
            Ok(Op::SetBackgroundRect { x1: 0.1, y1: 0.2, x2: 0.8, y2: 0.9 })
        );
    }

    #[test]
    fn figure_and_move() {
        assert_eq!(parse("figure 0.5 0.5"), Ok(Op::AddFigure { x: 0.5, y: 0.5 }));
        // Move deltas are never range-checked.
        assert_eq!(parse("move -3 9000"), Ok(Op::Move { dx: -3.0, dy: 9000.0 }));
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(
            parse("  figure\t 0.25   0.75  "),
            Ok(Op::AddFigure { x: 0.25, y: 0.75 })
        );
    }

    #[test]
    fn blank_line_is_empty_error() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   \t "), Err(ParseError::Empty));
    }

    #[test]
    fn unknown_command_carries_token() {
        assert_eq!(
            parse("paint 0.5 0.5"),
            Err(ParseError::UnknownCommand("paint".to_string()))
        );
        // Keywords are case-sensitive.
        assert_eq!(
            parse("WHITE"),
            Err(ParseError::UnknownCommand("WHITE".to_string()))
        );
    }

    #[test]
    fn wrong_arity_is_reported() {
        assert_eq!(
            parse("white now"),
            Err(ParseError::WrongArity { command: "white", expected: 0, found: 1 })
        );
        assert_eq!(
            parse("bgrect 0.1 0.2 0.8"),
            Err(ParseError::WrongArity { command: "bgrect", expected: 4, found: 3 })
        );
        assert_eq!(
            parse("move 1"),
            Err(ParseError::WrongArity { command: "move", expected: 2, found: 1 })
        );
    }

    #[test]
    fn non_numeric_argument() {
        assert_eq!(
            parse("figure 0.5 there"),
            Err(ParseError::InvalidNumber { command: "figure", token: "there".to_string() })
        );
    }

    #[test]
    fn out_of_range_arguments_rejected() {
        assert_eq!(
            parse("bgrect -0.1 0 1 1"),
            Err(ParseError::OutOfRange { command: "bgrect", token: "-0.1".to_string() })
        );
        assert_eq!(
            parse("figure 1.5 0.2"),
            Err(ParseError::OutOfRange { command: "figure", token: "1.5".to_string() })
        );
    }
}
