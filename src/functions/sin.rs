use std::f64::consts::{FRAC_PI_2, PI};

use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct SinCos;

/// `sin(x)` from `sin(x/3)` by the triple-angle formula.
fn sin_triple(x: f64) -> f64 {
    let s = (x / 3.0).sin();

    s * (3.0 - 4.0 * s * s)
}

fn cos_triple(x: f64) -> f64 {
    let c = (x / 3.0).cos();

    c * (4.0 * c * c - 3.0)
}

impl Suite for SinCos {
    fn phases(&self, _: &MachineParams) -> Result<Phases, DomainError> {
        let sin_title = "sin(x) vs 3 sin(x/3) - 4 sin(x/3)^3";

        Ok(smallvec![
            Phase::new(
                sin_title,
                Domain::new(0.0, FRAC_PI_2)?,
                Relation::new(f64::sin, sin_triple).purified(super::thirds),
            ),
            Phase::new(
                sin_title,
                Domain::new(6.0 * PI, 6.5 * PI)?,
                Relation::new(f64::sin, sin_triple).purified(super::thirds),
            ),
            Phase::new(
                "cos(x) vs 4 cos(x/3)^3 - 3 cos(x/3)",
                Domain::new(7.0 * PI, 7.5 * PI)?,
                Relation::new(f64::cos, cos_triple).purified(super::thirds),
            ),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let beta = f64::from(machine.ibeta);
        let betap = super::radix_power(machine);
        let a = 6.0 * PI;

        let c = 1.0 / beta.powi(machine.it / 2);
        let period = Check::unary(
            "sin has the right period if this is almost 1",
            [(Label::from("(sin(x + c) - sin(x - c)) / 2c"), a)],
            |x| ((x + c).sin() - (x - c).sin()) / (c + c),
        );

        let odd = super::symmetry("sin", true, a, rng, f64::sin);
        let small = super::small_argument("sin", machine, rng, f64::sin);
        let even = super::symmetry("cos", false, a, rng, f64::cos);

        let underflow = Check::unary(
            "underflow for very small arguments",
            [(
                Label::from("sin(x)"),
                beta.powf(f64::from(machine.minexp) * 0.75),
            )],
            f64::sin,
        );

        let z = betap.sqrt();
        let large = Check::unary(
            "loss of significance for consecutive large arguments",
            [
                (Label::from("sin(x)"), z * (1.0 - machine.epsneg)),
                (Label::from("sin(x)"), z),
                (Label::from("sin(x)"), z * (1.0 + machine.eps)),
            ],
            f64::sin,
        );

        let huge = Check::unary(
            "argument beyond the significand",
            [(Label::from("sin(x)"), betap)],
            f64::sin,
        );

        vec![period, odd, small, even, underflow, large, huge]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::Argument;
    use crate::machine;

    #[test]
    fn triple_angle_formulas() {
        for x in [0.3, 1.2, 20.0, 23.0] {
            assert!((sin_triple(x) - x.sin()).abs() < 1e-14);
            assert!((cos_triple(x) - x.cos()).abs() < 1e-14);
        }
    }

    #[test]
    fn period_and_consecutive_arguments() {
        let machine = machine::probe::<f64>();
        let mut rng = RandomSource::new();

        let checks = SinCos.checks(&machine, &mut rng);

        assert!((checks[0].values[0].result - 1.0).abs() < 1e-6);

        let large = &checks[5];

        let z = 2f64.powi(53).sqrt();

        assert_eq!(large.values.len(), 3);
        assert_eq!(large.values[1].argument, Argument::Unary(z));

        let underflow = &checks[4];

        assert!(underflow.values[0].result > 0.0);
    }
}
