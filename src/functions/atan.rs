use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct Atan;

/// `atan(x)` from the half-angle reduction.
fn atan_halved(x: f64) -> f64 {
    let y = x / (1.0 + (1.0 + x * x).sqrt());

    2.0 * y.atan()
}

fn atan2_unit(x: f64) -> f64 {
    x.atan2(1.0)
}

impl Suite for Atan {
    fn phases(&self, _: &MachineParams) -> Result<Phases, DomainError> {
        let title = "atan(x) vs 2 atan(x / (1 + sqrt(1 + x^2)))";

        Ok(smallvec![
            Phase::new(
                title,
                Domain::new(-0.0625, 0.0625)?,
                Relation::new(f64::atan, atan_halved),
            ),
            Phase::new(
                title,
                Domain::new(1.0, 2.0)?,
                Relation::new(f64::atan, atan_halved),
            ),
            Phase::new(
                "atan2(x, 1) vs atan(x)",
                Domain::new(1.0, 2.0)?,
                Relation::new(atan2_unit, f64::atan),
            ),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let odd = super::symmetry("atan", true, 5.0, rng, f64::atan);
        let small = super::small_argument("atan", machine, rng, f64::atan);

        let atan = Check::unary(
            "special arguments of atan",
            [
                (Label::from("atan(0)"), 0.0),
                (Label::from("atan(1), pi/4 expected"), 1.0),
                (Label::from("atan(xmax), pi/2 expected"), machine.xmax),
            ],
            f64::atan,
        );

        let atan2 = Check::binary(
            "special arguments of atan2",
            [
                (Label::from("atan2(1, 1), pi/4 expected"), (1.0, 1.0)),
                (Label::from("atan2(1, 0), pi/2 expected"), (1.0, 0.0)),
                (Label::from("atan2(0, 1)"), (0.0, 1.0)),
                (Label::from("atan2(-1, 0), -pi/2 expected"), (-1.0, 0.0)),
                (Label::from("atan2(0, 0)"), (0.0, 0.0)),
            ],
            f64::atan2,
        );

        vec![odd, small, atan, atan2]
    }
}
