use smallvec::smallvec;

use super::{Check, Label, Phases, Suite};
use crate::harness::{Domain, DomainError, Phase, Relation};
use crate::machine::MachineParams;
use crate::random::RandomSource;

pub struct SinhCosh;

fn sinh_triple(x: f64) -> f64 {
    let s = (x / 3.0).sinh();

    s * (3.0 + 4.0 * s * s)
}

fn cosh_triple(x: f64) -> f64 {
    let c = (x / 3.0).cosh();

    c * (4.0 * c * c - 3.0)
}

impl Suite for SinhCosh {
    fn phases(&self, machine: &MachineParams) -> Result<Phases, DomainError> {
        let small = Domain::new(0.0, 0.5)?;
        let large = Domain::new(3.0, machine.xmax.ln() - 3f64.ln())?;

        let sinh = "sinh(x) vs 3 sinh(x/3) + 4 sinh(x/3)^3";
        let cosh = "cosh(x) vs 4 cosh(x/3)^3 - 3 cosh(x/3)";

        Ok(smallvec![
            Phase::new(
                sinh,
                small,
                Relation::new(f64::sinh, sinh_triple).purified(super::thirds),
            ),
            Phase::new(
                sinh,
                large,
                Relation::new(f64::sinh, sinh_triple).purified(super::thirds),
            ),
            Phase::new(
                cosh,
                small,
                Relation::new(f64::cosh, cosh_triple).purified(super::thirds),
            ),
            Phase::new(
                cosh,
                large,
                Relation::new(f64::cosh, cosh_triple).purified(super::thirds),
            ),
        ])
    }

    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check> {
        let odd = super::symmetry("sinh", true, 5.0, rng, f64::sinh);
        let small = super::small_argument("sinh", machine, rng, f64::sinh);
        let even = super::symmetry("cosh", false, 5.0, rng, f64::cosh);

        let sinh_zero = Check::unary(
            "special arguments of sinh",
            [(Label::from("sinh(0)"), 0.0)],
            f64::sinh,
        );

        let cosh_zero = Check::unary(
            "special arguments of cosh",
            [(Label::from("cosh(0), 1 expected"), 0.0)],
            f64::cosh,
        );

        let overflow = Check::unary(
            "error returns",
            [(
                Label::from("sinh(x), overflow expected"),
                machine.xmax.ln() + 2.0,
            )],
            f64::sinh,
        );

        vec![odd, small, even, sinh_zero, cosh_zero, overflow]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_angle_formulas() {
        for x in [0.1f64, 0.45, 3.5, 30.0] {
            let sinh = x.sinh();
            let cosh = x.cosh();

            assert!((sinh_triple(x) - sinh).abs() < 1e-14 * sinh);
            assert!((cosh_triple(x) - cosh).abs() < 1e-14 * cosh);
        }
    }

    #[test]
    fn large_domain_stays_finite() {
        let machine = crate::machine::probe::<f64>();
        let phases = SinhCosh.phases(&machine).unwrap();

        let right = phases[1].domain.right;

        assert!(sinh_triple(right).is_finite());
        assert!(cosh_triple(right).is_finite());
    }

    #[test]
    fn overflow() {
        let machine = crate::machine::probe::<f64>();
        let mut rng = RandomSource::new();

        let checks = SinhCosh.checks(&machine, &mut rng);

        assert_eq!(checks[3].values[0].result, 0.0);
        assert_eq!(checks[4].values[0].result, 1.0);
        assert_eq!(checks[5].values[0].result, f64::INFINITY);
    }
}
