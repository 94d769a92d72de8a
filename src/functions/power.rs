use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{
    Argument, Domain, DomainError, Evaluation, Identity, Phase,
};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct Power;

/// Identity in the base `x` and an exponent `y` drawn from `(0, 2)`.
struct PowerIdentity {
    reference: fn(f64, f64) -> f64,
    candidate: fn(f64, f64) -> f64,
}

impl Identity for PowerIdentity {
    fn evaluate(&self, x: f64, rng: &mut RandomSource) -> Evaluation {
        let y = rng.draw() * 2.0;

        Evaluation {
            argument: Argument::Binary(x, y),
            reference: (self.reference)(x, y),
            candidate: (self.candidate)(x, y),
        }
    }
}

const SQUARED: PowerIdentity = PowerIdentity {
    reference: |x, y| x.powf(2.0 * y),
    candidate: |x, y| {
        let z = x.powf(y);

        z * z
    },
};

const EXP_LOG: PowerIdentity = PowerIdentity {
    reference: f64::powf,
    candidate: |x, y| (y * x.ln()).exp(),
};

impl Suite for Power {
    fn phases(&self, machine: &MachineParams) -> Result<Phases, DomainError> {
        let beta = f64::from(machine.ibeta);

        let below = Domain::new(1.0 / beta, 1.0)?;
        let above = Domain::new(1.0, beta)?;

        let squared = "x^(2y) vs (x^y)^2";
        let exp_log = "x^y vs exp(y ln(x))";

        Ok(smallvec![
            Phase::new(squared, below, SQUARED),
            Phase::new(squared, above, SQUARED),
            Phase::new(exp_log, below, EXP_LOG),
            Phase::new(exp_log, above, EXP_LOG),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let mut draw = |label: &'static str, y: f64| -> Vec<_> {
            (0..super::REPEATS)
                .map(|_| (Label::from(label), (rng.draw() * 10.0, y)))
                .collect()
        };

        let first = Check::binary("x^1 = x", draw("x^1 - x", 1.0), |x, y| {
            x.powf(y) - x
        });

        let zeroth = Check::binary("x^0 = 1", draw("x^0 - 1", 0.0), |x, y| {
            x.powf(y) - 1.0
        });

        let special = Check::binary(
            "special arguments",
            [
                (Label::from("1^0"), (1.0, 0.0)),
                (Label::from("0^1"), (0.0, 1.0)),
                (Label::from("2^2, 4 expected"), (2.0, 2.0)),
                (Label::from("2^10, 1024 expected"), (2.0, 10.0)),
                (Label::from("10^2, 100 expected"), (10.0, 2.0)),
            ],
            f64::powf,
        );

        let errors = Check::binary(
            "error returns",
            [
                (Label::from("0^0"), (0.0, 0.0)),
                (Label::from("(-2)^3.5, NaN expected"), (-2.0, 3.5)),
                (Label::from("xmax^2, inf expected"), (machine.xmax, 2.0)),
            ],
            f64::powf,
        );

        vec![first, zeroth, special, errors]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_is_drawn_per_trial() {
        let mut rng = RandomSource::new();

        let first = SQUARED.evaluate(0.75, &mut rng);
        let second = SQUARED.evaluate(0.75, &mut rng);

        let (Argument::Binary(_, y1), Argument::Binary(_, y2)) =
            (first.argument, second.argument)
        else {
            panic!("power identities take two arguments");
        };

        assert_ne!(y1, y2);
        assert!(0.0 < y1 && y1 < 2.0);
        assert!((first.reference - first.candidate).abs() < 1e-15);
    }

    #[test]
    fn exact_powers() {
        let machine = crate::machine::probe::<f64>();
        let mut rng = RandomSource::new();

        let checks = Power.checks(&machine, &mut rng);

        assert!(checks[0].values.iter().all(|value| value.result == 0.0));
        assert!(checks[1].values.iter().all(|value| value.result == 0.0));

        let special: Vec<_> =
            checks[2].values.iter().map(|value| value.result).collect();

        assert_eq!(special, [1.0, 0.0, 4.0, 1024.0, 100.0]);

        let errors = &checks[3].values;

        assert_eq!(errors[0].result, 1.0);
        assert!(errors[1].result.is_nan());
        assert_eq!(errors[2].result, f64::INFINITY);
    }
}
