//! Accuracy suites for the elementary functions.
//!
//! Each suite is a fixed table of accuracy phases followed by a set of
//! special-value checks. [`run_suite`] drives both against one random
//! source, phases first and in table order.

mod asin;
mod atan;
mod exp;
mod logarithm;
mod power;
mod sin;
mod sinh;
mod sqrt;
mod tan;
mod tanh;

use std::borrow::Cow;
use std::iter;
use std::num::NonZeroU32;

use smallvec::SmallVec;
use strum::VariantArray;
use strum_macros::{Display, EnumString, VariantArray, VariantNames};

use crate::harness::{
    self, Argument, DEFAULT_TRIALS, Domain, DomainError, Phase, Sampling,
    SpecialValue, TrialStatistics,
};
use crate::machine::MachineParams;
use crate::random::RandomSource;

/// Rows produced by each randomized special check.
const REPEATS: usize = 5;

type Label = Cow<'static, str>;

type Phases = SmallVec<[Phase<'static>; 4]>;

/// Selectable test suites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, VariantArray, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Sin,
    Tan,
    Asin,
    Atan,
    Exp,
    Log,
    Power,
    Sinh,
    Tanh,
    Sqrt,
}

impl Function {
    pub const ALL: &'static [Function] = <Self as VariantArray>::VARIANTS;

    /// The functions covered by the suite.
    pub fn title(self) -> &'static str {
        match self {
            Function::Sin => "sin/cos",
            Function::Tan => "tan/cot",
            Function::Asin => "asin/acos",
            Function::Atan => "atan/atan2",
            Function::Exp => "exp",
            Function::Log => "log/log10",
            Function::Power => "pow",
            Function::Sinh => "sinh/cosh",
            Function::Tanh => "tanh",
            Function::Sqrt => "sqrt",
        }
    }

    fn suite(self) -> &'static dyn Suite {
        match self {
            Function::Sin => &sin::SinCos,
            Function::Tan => &tan::TanCot,
            Function::Asin => &asin::AsinAcos,
            Function::Atan => &atan::Atan,
            Function::Exp => &exp::Exp,
            Function::Log => &logarithm::Log,
            Function::Power => &power::Power,
            Function::Sinh => &sinh::SinhCosh,
            Function::Tanh => &tanh::Tanh,
            Function::Sqrt => &sqrt::Sqrt,
        }
    }
}

/// Configuration table for one suite.
trait Suite {
    fn phases(&self, machine: &MachineParams) -> Result<Phases, DomainError>;

    /// Special-value checks, run after every phase.
    fn checks(
        &self,
        machine: &MachineParams,
        rng: &mut RandomSource,
    ) -> Vec<Check>;
}

/// A titled group of special values.
#[derive(Clone, Debug)]
pub struct Check {
    pub title: Cow<'static, str>,
    pub values: Vec<SpecialValue<Label, Argument>>,
}

impl Check {
    fn unary<T, I, F>(title: T, probes: I, f: F) -> Check
    where
        T: Into<Cow<'static, str>>,
        I: IntoIterator<Item = (Label, f64)>,
        F: Fn(f64) -> f64,
    {
        let values = harness::run_special_value_pass(probes, f)
            .into_iter()
            .map(|value| SpecialValue {
                label: value.label,
                argument: Argument::Unary(value.argument),
                result: value.result,
            })
            .collect();

        Check {
            title: title.into(),
            values,
        }
    }

    fn binary<T, I, F>(title: T, probes: I, f: F) -> Check
    where
        T: Into<Cow<'static, str>>,
        I: IntoIterator<Item = (Label, (f64, f64))>,
        F: Fn(f64, f64) -> f64,
    {
        let values = harness::run_special_value_pass(probes, |(x, y)| f(x, y))
            .into_iter()
            .map(|value| {
                let (x, y) = value.argument;

                SpecialValue {
                    label: value.label,
                    argument: Argument::Binary(x, y),
                    result: value.result,
                }
            })
            .collect();

        Check {
            title: title.into(),
            values,
        }
    }
}

/// Checks `f(-x) = -f(x)`, or `f(-x) = f(x)` when `odd` is false, at random
/// arguments in `(0, scale)`.
fn symmetry<F>(
    name: &str,
    odd: bool,
    scale: f64,
    rng: &mut RandomSource,
    f: F,
) -> Check
where
    F: Fn(f64) -> f64,
{
    let (title, label) = if odd {
        (
            format!("{name}(-x) = -{name}(x)"),
            format!("{name}(x) + {name}(-x)"),
        )
    } else {
        (
            format!("{name}(-x) = {name}(x)"),
            format!("{name}(x) - {name}(-x)"),
        )
    };

    let probes: Vec<_> = (0..REPEATS)
        .map(|_| (Label::from(label.clone()), rng.draw() * scale))
        .collect();

    Check::unary(title, probes, |x| {
        if odd {
            f(x) + f(-x)
        } else {
            f(x) - f(-x)
        }
    })
}

/// Checks `f(x) = x` for arguments below one unit in the last place of one,
/// each a radix power smaller than the last.
fn small_argument<F>(
    name: &str,
    machine: &MachineParams,
    rng: &mut RandomSource,
    f: F,
) -> Check
where
    F: Fn(f64) -> f64,
{
    let beta = f64::from(machine.ibeta);
    let start = rng.draw() / beta.powi(machine.it);

    let label = format!("x - {name}(x)");
    let probes = iter::successors(Some(start), |x| Some(x / beta))
        .take(REPEATS)
        .map(|x| (Label::from(label.clone()), x));

    Check::unary(format!("{name}(x) = x for small x"), probes, |x| x - f(x))
}

/// Purifies `x` so that `x / 3` is exact.
fn thirds(x: f64) -> f64 {
    let y = (x + x / 3.0) - x;

    y * 3.0
}

/// The radix raised to the number of significand digits.
fn radix_power(machine: &MachineParams) -> f64 {
    f64::from(machine.ibeta).powi(machine.it)
}

/// Trial count and sampling layout applied to every phase of a suite.
#[derive(Clone, Copy, Debug)]
pub struct SuiteOptions {
    pub trials: NonZeroU32,
    pub sampling: Sampling,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        SuiteOptions {
            trials: DEFAULT_TRIALS,
            sampling: Sampling::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhaseReport {
    pub title: String,
    pub domain: Domain,
    pub statistics: TrialStatistics,
}

#[derive(Clone, Debug)]
pub struct SuiteReport {
    pub function: Function,
    pub phases: Vec<PhaseReport>,
    pub checks: Vec<Check>,
}

/// Runs every phase of a suite and then its special checks.
///
/// # Examples
///
/// ```
/// # use std::num::NonZeroU32;
/// #
/// # use elefunt::functions::{self, Function, SuiteOptions};
/// # use elefunt::machine;
/// # use elefunt::random::RandomSource;
/// #
/// let machine = machine::probe::<f64>();
/// let mut rng = RandomSource::new();
///
/// let options = SuiteOptions {
///     trials: NonZeroU32::new(100).unwrap(),
///     ..Default::default()
/// };
///
/// let report =
///     functions::run_suite(Function::Sqrt, &machine, &mut rng, &options)
///         .unwrap();
///
/// assert_eq!(report.phases.len(), 2);
/// assert!(report.phases.iter().all(|phase| phase.statistics.trials == 100));
/// ```
pub fn run_suite(
    function: Function,
    machine: &MachineParams,
    rng: &mut RandomSource,
    options: &SuiteOptions,
) -> Result<SuiteReport, DomainError> {
    log::info!("running the {} suite", function.title());

    let suite = function.suite();

    let phases = suite
        .phases(machine)?
        .into_iter()
        .map(|phase| {
            let phase = phase
                .with_trials(options.trials)
                .with_sampling(options.sampling);

            let statistics = harness::run_accuracy_phase(&phase, machine, rng);

            PhaseReport {
                title: phase.title,
                domain: phase.domain,
                statistics,
            }
        })
        .collect();

    let checks = suite.checks(machine, rng);

    log::debug!("{function}: {} special checks", checks.len());

    Ok(SuiteReport {
        function,
        phases,
        checks,
    })
}
