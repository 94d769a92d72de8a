use std::f64::consts::FRAC_PI_2;

use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct AsinAcos;

/// Terms of the Maclaurin series kept for `|x| <= 1/8`.
const SERIES_TERMS: usize = 12;

/// `asin(x)` summed from its Maclaurin series, smallest term first.
fn asin_series(x: f64) -> f64 {
    let x2 = x * x;

    let mut terms = [0.0; SERIES_TERMS];
    let mut term = x;

    for (n, slot) in terms.iter_mut().enumerate() {
        *slot = term / (2 * n + 1) as f64;

        let odd = (2 * n + 1) as f64;

        term *= x2 * odd / (odd + 1.0);
    }

    terms.iter().rev().sum()
}

/// `asin(x)` for `x >= 1/2` from the half-angle reduction.
fn asin_reduced(x: f64) -> f64 {
    FRAC_PI_2 - 2.0 * ((1.0 - x) / 2.0).sqrt().asin()
}

fn acos_complement(x: f64) -> f64 {
    FRAC_PI_2 - x.asin()
}

impl Suite for AsinAcos {
    fn phases(&self, machine: &MachineParams) -> Result<Phases, DomainError> {
        Ok(smallvec![
            Phase::new(
                "asin(x) vs Taylor series",
                Domain::new(-0.125, 0.125)?,
                Relation::new(f64::asin, asin_series),
            ),
            Phase::new(
                "asin(x) vs pi/2 - 2 asin(sqrt((1 - x)/2))",
                Domain::new(0.5, 1.0)?,
                Relation::new(f64::asin, asin_reduced),
            ),
            Phase::new(
                "acos(x) vs pi/2 - asin(x)",
                Domain::new(0.5, 1.0 - machine.eps)?,
                Relation::new(f64::acos, acos_complement),
            ),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let odd = super::symmetry("asin", true, 1.0, rng, f64::asin);
        let small = super::small_argument("asin", machine, rng, f64::asin);

        let asin = Check::unary(
            "special arguments of asin",
            [
                (Label::from("asin(0)"), 0.0),
                (Label::from("asin(1), pi/2 expected"), 1.0),
            ],
            f64::asin,
        );

        let acos = Check::unary(
            "special arguments of acos",
            [
                (Label::from("acos(0), pi/2 expected"), 0.0),
                (Label::from("acos(1)"), 1.0),
            ],
            f64::acos,
        );

        let domain = Check::unary(
            "argument outside the domain",
            [(Label::from("asin(x), NaN expected"), 1.2)],
            f64::asin,
        );

        vec![odd, small, asin, acos, domain]
    }
}
