use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct Tanh;

fn tanh_double(x: f64) -> f64 {
    let t = (x / 2.0).tanh();

    (t + t) / (1.0 + t * t)
}

impl Suite for Tanh {
    fn phases(&self, _: &MachineParams) -> Result<Phases, DomainError> {
        let title = "tanh(x) vs 2 tanh(x/2) / (1 + tanh(x/2)^2)";

        let phase = |left, right| -> Result<Phase<'static>, DomainError> {
            Ok(Phase::new(
                title,
                Domain::new(left, right)?,
                Relation::new(f64::tanh, tanh_double),
            ))
        };

        Ok(smallvec![phase(0.0, 0.5)?, phase(0.5, 5.0)?, phase(5.0, 20.0)?])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let odd = super::symmetry("tanh", true, 5.0, rng, f64::tanh);
        let small = super::small_argument("tanh", machine, rng, f64::tanh);

        let special = Check::unary(
            "special arguments",
            [
                (Label::from("tanh(0)"), 0.0),
                (Label::from("tanh(20), about 1 expected"), 20.0),
                (Label::from("tanh(-20), about -1 expected"), -20.0),
                (Label::from("tanh(xmax), 1 expected"), machine.xmax),
            ],
            f64::tanh,
        );

        vec![odd, small, special]
    }
}
