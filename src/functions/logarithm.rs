use std::f64::consts::{FRAC_1_SQRT_2, LN_10};

use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct Log;

/// `ln(17/16)`.
const LN_17_16: f64 = 6.0624621816434842580e-2;

/// `ln(11/10)`.
const LN_11_10: f64 = 9.5310179804324860044e-2;

/// Clears the low-order bits of `x` in `[1/2, 1)` so that `x / 16` adds to
/// it exactly.
fn purify(x: f64) -> f64 {
    (x + 8.0) - 8.0
}

fn log_sixteenths(x: f64) -> f64 {
    (x + x / 16.0).ln() - LN_17_16
}

fn log_tenths(x: f64) -> f64 {
    (x + x / 10.0).ln() - LN_11_10
}

fn log_square(x: f64) -> f64 {
    (x * x).ln()
}

fn twice_log(x: f64) -> f64 {
    2.0 * x.ln()
}

fn log10_scaled(x: f64) -> f64 {
    x.ln() / LN_10
}

impl Suite for Log {
    fn phases(&self, _: &MachineParams) -> Result<Phases, DomainError> {
        let unit = Domain::new(FRAC_1_SQRT_2, 15.0 / 16.0)?;

        Ok(smallvec![
            Phase::new(
                "ln(x) vs ln(17x/16) - ln(17/16)",
                unit,
                Relation::new(f64::ln, log_sixteenths).purified(purify),
            ),
            Phase::new(
                "ln(x) vs ln(11x/10) - ln(11/10)",
                unit,
                Relation::new(f64::ln, log_tenths).purified(purify),
            ),
            Phase::new(
                "ln(x^2) vs 2 ln(x)",
                Domain::new(16.0, 240.0)?,
                Relation::new(log_square, twice_log),
            ),
            Phase::new(
                "log10(x) vs ln(x) / ln(10)",
                unit,
                Relation::new(f64::log10, log10_scaled),
            ),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let probes: Vec<_> = (0..super::REPEATS)
            .map(|_| {
                let x = rng.draw();

                (Label::from("ln(x) + ln(1/x)"), x + x + 15.0 / 16.0)
            })
            .collect();

        let inverse = Check::unary("ln(x) = -ln(1/x)", probes, |x| {
            x.ln() + (1.0 / x).ln()
        });

        let special = Check::unary(
            "special arguments",
            [
                (Label::from("ln(1)"), 1.0),
                (Label::from("ln(xmin)"), machine.xmin),
                (Label::from("ln(xmax)"), machine.xmax),
            ],
            f64::ln,
        );

        let domain = Check::unary(
            "error returns",
            [
                (Label::from("ln(x), NaN expected"), -2.0),
                (Label::from("ln(x), -inf expected"), 0.0),
            ],
            f64::ln,
        );

        vec![inverse, special, domain]
    }
}
