//! Property tests for the command grammar.
//!
//! Invariants:
//! 1. Any coordinates in [0, 1] are accepted by `bgrect` and `figure`, and
//!    round-trip into the operation unchanged.
//! 2. Any coordinate outside [0, 1] is rejected with `OutOfRange`.
//! 3. `move` accepts any finite pair of deltas.
//! 4. The parser never panics on arbitrary input lines.

use easel_proto::{ParseError, parse};
use easel_runtime::op::Op;
use proptest::prelude::*;

proptest! {
    #[test]
    fn unit_interval_figure_round_trips(x in 0.0f64..=1.0, y in 0.0f64..=1.0) {
        prop_assert_eq!(parse(&format!("figure {x} {y}")), Ok(Op::AddFigure { x, y }));
    }

    #[test]
    fn unit_interval_bgrect_round_trips(
        x1 in 0.0f64..=1.0,
        y1 in 0.0f64..=1.0,
        x2 in 0.0f64..=1.0,
        y2 in 0.0f64..=1.0,
    ) {
        prop_assert_eq!(
            parse(&format!("bgrect {x1} {y1} {x2} {y2}")),
            Ok(Op::SetBackgroundRect { x1, y1, x2, y2 })
        );
    }

    #[test]
    fn out_of_range_figure_rejected(x in prop_oneof![-1000.0f64..-0.0001, 1.0001f64..1000.0]) {
        prop_assert!(matches!(
            parse(&format!("figure {x} 0.5")),
            Err(ParseError::OutOfRange { command: "figure", .. })
        ), "expected OutOfRange for figure with x out of range");
    }

    #[test]
    fn move_accepts_any_finite_deltas(
        dx in -1.0e6f64..=1.0e6,
        dy in -1.0e6f64..=1.0e6,
    ) {
        prop_assert_eq!(parse(&format!("move {dx} {dy}")), Ok(Op::Move { dx, dy }));
    }

    #[test]
    fn parser_never_panics(line in "\\PC{0,60}") {
        let _ = parse(&line);
    }
}
