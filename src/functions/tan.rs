use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct TanCot;

fn tan_triple(x: f64) -> f64 {
    let t = (x / 3.0).tan();
    let t2 = t * t;

    t * (3.0 - t2) / (1.0 - 3.0 * t2)
}

fn cot(x: f64) -> f64 {
    1.0 / x.tan()
}

/// `cot(x)` from `cot(x/2)` by the double-angle formula.
fn cot_double(x: f64) -> f64 {
    let c = cot(x / 2.0);

    (c * c - 1.0) / (c + c)
}

impl Suite for TanCot {
    fn phases(&self, _: &MachineParams) -> Result<Phases, DomainError> {
        let tan_title = "tan(x) vs triple-angle formula in tan(x/3)";
        let large = Domain::new(6.0 * PI, 6.0 * PI + FRAC_PI_4)?;

        Ok(smallvec![
            Phase::new(
                tan_title,
                Domain::new(0.0, FRAC_PI_4)?,
                Relation::new(f64::tan, tan_triple).purified(super::thirds),
            ),
            Phase::new(
                tan_title,
                large,
                Relation::new(f64::tan, tan_triple).purified(super::thirds),
            ),
            Phase::new(
                "cot(x) vs (cot(x/2)^2 - 1) / (2 cot(x/2))",
                large,
                Relation::new(cot, cot_double),
            ),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let odd = super::symmetry("tan", true, 6.0 * PI, rng, f64::tan);
        let small = super::small_argument("tan", machine, rng, f64::tan);

        let pole = Check::unary(
            "tan near its pole is large but finite",
            [(Label::from("tan(pi/2)"), FRAC_PI_2)],
            f64::tan,
        );

        vec![odd, small, pole]
    }
}
