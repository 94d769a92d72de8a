use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct Sqrt;

fn quotient(x: f64) -> f64 {
    x / x.sqrt()
}

impl Suite for Sqrt {
    fn phases(&self, machine: &MachineParams) -> Result<Phases, DomainError> {
        let beta = f64::from(machine.ibeta);
        let title = "sqrt(x) vs x / sqrt(x)";

        Ok(smallvec![
            Phase::new(
                title,
                Domain::new(1.0 / beta, 1.0)?,
                Relation::new(f64::sqrt, quotient),
            ),
            Phase::new(
                title,
                Domain::new(1.0, beta)?,
                Relation::new(f64::sqrt, quotient),
            ),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let probes: Vec<_> = (0..super::REPEATS)
            .map(|_| (Label::from("sqrt(x)^2 - x"), rng.draw()))
            .collect();

        let square = Check::unary("sqrt(x)^2 = x", probes, |x| {
            let y = x.sqrt();

            y * y - x
        });

        let special = Check::unary(
            "special arguments",
            [
                (Label::from("sqrt(xmin)"), machine.xmin),
                (Label::from("sqrt(1 - epsneg)"), 1.0 - machine.epsneg),
                (Label::from("sqrt(1)"), 1.0),
                (Label::from("sqrt(1 + eps)"), 1.0 + machine.eps),
                (Label::from("sqrt(xmax)"), machine.xmax),
            ],
            f64::sqrt,
        );

        let errors = Check::unary(
            "error returns",
            [
                (Label::from("sqrt(0)"), 0.0),
                (Label::from("sqrt(-1), NaN expected"), -1.0),
            ],
            f64::sqrt,
        );

        vec![square, special, errors]
    }
}
