//! Special-value pass.

/// A function value recorded at a labelled probe argument.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecialValue<L, A> {
    pub label: L,
    pub argument: A,
    pub result: f64,
}

/// Evaluates `f` at every probe argument, in order.
///
/// No threshold is applied; the caller decides what the results mean.
///
/// # Examples
///
/// ```
/// # use elefunt::harness::run_special_value_pass;
/// #
/// let values = run_special_value_pass(
///     [("zero", 0.0), ("one", 1.0)],
///     f64::exp,
/// );
///
/// assert_eq!(values[0].result, 1.0);
/// assert_eq!(values[1].label, "one");
/// ```
pub fn run_special_value_pass<L, A, I, F>(
    probes: I,
    mut f: F,
) -> Vec<SpecialValue<L, A>>
where
    A: Copy,
    I: IntoIterator<Item = (L, A)>,
    F: FnMut(A) -> f64,
{
    probes
        .into_iter()
        .map(|(label, argument)| SpecialValue {
            label,
            argument,
            result: f(argument),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn special_outputs_are_recorded() {
        let values = run_special_value_pass(
            [
                ("negative", -2.0),
                ("zero", 0.0),
                ("negative zero", -0.0),
            ],
            f64::ln,
        );

        assert_eq!(values.len(), 3);
        assert!(values[0].result.is_nan());
        assert_eq!(values[1].result, f64::NEG_INFINITY);
        assert_eq!(values[2].result, f64::NEG_INFINITY);
        assert!(values[2].argument.is_sign_negative());
    }

    #[test]
    fn binary_arguments() {
        let values = run_special_value_pass(
            [("origin", (0.0, 0.0)), ("unit", (1.0, 1.0))],
            |(y, x): (f64, f64)| y.atan2(x),
        );

        assert_eq!(values[0].result, 0.0);
        let quarter_pi = std::f64::consts::FRAC_PI_4;

        assert!((values[1].result - quarter_pi).abs() < 1e-15);
    }
}
