use std::f64::consts::LN_2;

use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct Exp;

/// `1 - exp(-1/16)`.
const SMALL_SHIFT_COMPLEMENT: f64 = 6.058693718652421388e-2;

/// `1/16 - exp(-45/16)`.
const LARGE_SHIFT_BINARY: f64 = 2.4453321046920570389e-3;

/// `exp(-45/16) - 6/100`.
const LARGE_SHIFT_DECIMAL: f64 = 5.466789530794296106e-5;

/// Purification for a shift of `v`: makes `x - v` exact.
fn shifted(v: f64) -> impl Fn(f64) -> f64 {
    move |x| {
        let y = x - v;

        if y < 0.0 {
            y + v
        } else {
            x
        }
    }
}

impl Suite for Exp {
    fn phases(&self, machine: &MachineParams) -> Result<Phases, DomainError> {
        const SMALL: f64 = 1.0 / 16.0;
        const LARGE: f64 = 45.0 / 16.0;

        let decimal = machine.ibeta == 10;

        let scaled = move |x: f64| {
            let z = x.exp();

            if decimal {
                z * 6.0e-2 + z * LARGE_SHIFT_DECIMAL
            } else {
                z * 0.0625 - z * LARGE_SHIFT_BINARY
            }
        };

        let large_title = "exp(x - 45/16) vs exp(x) / exp(45/16)";

        let tiny = 4.0 * machine.xmin * super::radix_power(machine);
        let huge = 0.9 * machine.xmax;

        Ok(smallvec![
            Phase::new(
                "exp(x - 1/16) vs exp(x) / exp(1/16)",
                Domain::new(-LN_2 / 2.0 + SMALL, LN_2 / 2.0)?,
                Relation::new(
                    |x: f64| (x - SMALL).exp(),
                    |x: f64| {
                        let z = x.exp();

                        z - z * SMALL_SHIFT_COMPLEMENT
                    },
                )
                .purified(shifted(SMALL)),
            ),
            Phase::new(
                large_title,
                Domain::new(tiny.ln(), -5.0 * LN_2)?,
                Relation::new(|x: f64| (x - LARGE).exp(), scaled)
                    .purified(shifted(LARGE)),
            ),
            Phase::new(
                large_title,
                Domain::new(10.0 * LN_2, huge.ln())?,
                Relation::new(|x: f64| (x - LARGE).exp(), scaled)
                    .purified(shifted(LARGE)),
            ),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let beta = f64::from(machine.ibeta);

        let probes: Vec<_> = (0..super::REPEATS)
            .map(|_| (Label::from("exp(x) exp(-x) - 1"), rng.draw() * beta))
            .collect();

        let inverse = Check::unary("exp(x) exp(-x) = 1", probes, |x| {
            x.exp() * (-x).exp() - 1.0
        });

        let small = machine.xmin.ln().floor();
        let large = machine.xmax.ln().floor();

        let special = Check::unary(
            "special arguments",
            [
                (Label::from("exp(0), 1 expected"), 0.0),
                (Label::from("exp(floor(ln(xmin)))"), small),
                (Label::from("exp(floor(ln(xmax)))"), large),
            ],
            f64::exp,
        );

        let reduction = Check::unary(
            "argument reduction is sound if this is about 1",
            [(Label::from("exp(x) / exp(x/2)^2"), large / 2.0)],
            |x| {
                let y = (x / 2.0).exp();

                x.exp() / (y * y)
            },
        );

        let limit = 1.0 / machine.xmin.sqrt();
        let range = Check::unary(
            "error returns",
            [
                (Label::from("exp(x), underflow expected"), -limit),
                (Label::from("exp(x), overflow expected"), limit),
            ],
            f64::exp,
        );

        vec![inverse, special, reduction, range]
    }
}
