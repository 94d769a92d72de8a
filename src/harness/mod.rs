//! Statistical identity tests.
//!
//! An accuracy phase samples arguments from a domain, evaluates a reference
//! value and an identity-derived candidate at each one, and summarizes the
//! relative errors in radix digits of the probed machine.

mod special;
pub mod stats;

use std::fmt;
use std::num::NonZeroU32;

use strum_macros::{Display, EnumString, VariantNames};

use crate::machine::MachineParams;
use crate::random::RandomSource;

pub use special::{SpecialValue, run_special_value_pass};
pub use stats::{Accumulator, ErrorEstimate, TrialStatistics};

pub const DEFAULT_TRIALS: NonZeroU32 = match NonZeroU32::new(2000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Half-open sampling interval `[left, right)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub left: f64,
    pub right: f64,
}

impl Domain {
    /// Creates a domain, rejecting non-finite or empty intervals.
    ///
    /// # Examples
    ///
    /// ```
    /// # use elefunt::harness::Domain;
    /// #
    /// assert!(Domain::new(0.0, 1.0).is_ok());
    /// assert!(Domain::new(1.0, 1.0).is_err());
    /// assert!(Domain::new(0.0, f64::INFINITY).is_err());
    /// assert!(Domain::new(-f64::MAX, f64::MAX).is_err());
    /// ```
    pub fn new(left: f64, right: f64) -> Result<Domain, DomainError> {
        if !left.is_finite() || !right.is_finite() {
            return Err(DomainError::NonFinite(left, right));
        }

        if left >= right {
            return Err(DomainError::Empty(left, right));
        }

        if !(right - left).is_finite() {
            return Err(DomainError::TooWide(left, right));
        }

        Ok(Domain { left, right })
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:e}, {:e})", self.left, self.right)
    }
}

#[derive(Debug)]
pub enum DomainError {
    NonFinite(f64, f64),
    Empty(f64, f64),
    /// The width of the interval overflows.
    TooWide(f64, f64),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DomainError::NonFinite(left, right) => {
                write!(f, "domain [{left}, {right}) has a non-finite bound")
            }
            DomainError::Empty(left, right) => {
                write!(f, "domain [{left}, {right}) is empty")
            }
            DomainError::TooWide(left, right) => {
                write!(f, "domain [{left}, {right}) is too wide to sample")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Layout of sampled arguments within a domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[derive(Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum Sampling {
    /// Independent draws across the whole domain.
    #[default]
    Uniform,
    /// One draw in each of `n` equal cells, left to right.
    Stratified,
}

/// Point at which a trial was evaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Argument {
    Unary(f64),
    Binary(f64, f64),
}

impl Default for Argument {
    fn default() -> Self {
        Argument::Unary(0.0)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Argument::Unary(x) => write!(f, "{x:.16e}"),
            Argument::Binary(x, y) => write!(f, "({x:.16e}, {y:.16e})"),
        }
    }
}

/// Outcome of one trial.
#[derive(Clone, Copy, Debug)]
pub struct Evaluation {
    pub argument: Argument,
    pub reference: f64,
    pub candidate: f64,
}

/// Pair of expressions that agree mathematically.
pub trait Identity {
    /// Evaluates both sides at the sampled value `x`. Identities of more
    /// than one argument may draw the rest from `rng`.
    fn evaluate(&self, x: f64, rng: &mut RandomSource) -> Evaluation;
}

impl<I: Identity + ?Sized> Identity for &I {
    fn evaluate(&self, x: f64, rng: &mut RandomSource) -> Evaluation {
        (**self).evaluate(x, rng)
    }
}

/// Unary identity built from a reference function, a candidate function,
/// and an optional purification step applied to the argument first.
pub struct Relation<R, C, P = fn(f64) -> f64> {
    reference: R,
    candidate: C,
    purify: Option<P>,
}

impl<R, C> Relation<R, C>
where
    R: Fn(f64) -> f64,
    C: Fn(f64) -> f64,
{
    pub fn new(reference: R, candidate: C) -> Self {
        Relation {
            reference,
            candidate,
            purify: None,
        }
    }
}

impl<R, C, P> Relation<R, C, P> {
    pub fn purified<Q>(self, purify: Q) -> Relation<R, C, Q>
    where
        Q: Fn(f64) -> f64,
    {
        Relation {
            reference: self.reference,
            candidate: self.candidate,
            purify: Some(purify),
        }
    }
}

impl<R, C, P> Identity for Relation<R, C, P>
where
    R: Fn(f64) -> f64,
    C: Fn(f64) -> f64,
    P: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64, _: &mut RandomSource) -> Evaluation {
        let x = self.purify.as_ref().map_or(x, |purify| purify(x));

        Evaluation {
            argument: Argument::Unary(x),
            reference: (self.reference)(x),
            candidate: (self.candidate)(x),
        }
    }
}

/// A configured accuracy test.
pub struct Phase<'a> {
    pub title: String,
    pub domain: Domain,
    pub trials: NonZeroU32,
    pub sampling: Sampling,
    pub identity: Box<dyn Identity + 'a>,
}

impl<'a> Phase<'a> {
    pub fn new<S, I>(title: S, domain: Domain, identity: I) -> Phase<'a>
    where
        S: Into<String>,
        I: Identity + 'a,
    {
        Phase {
            title: title.into(),
            domain,
            trials: DEFAULT_TRIALS,
            sampling: Sampling::default(),
            identity: Box::new(identity),
        }
    }

    pub fn with_trials(self, trials: NonZeroU32) -> Phase<'a> {
        Phase { trials, ..self }
    }

    pub fn with_sampling(self, sampling: Sampling) -> Phase<'a> {
        Phase { sampling, ..self }
    }
}

/// Runs an accuracy phase, drawing every random value from `rng`.
///
/// # Examples
///
/// ```
/// # use elefunt::harness::{self, Domain, Phase, Relation};
/// # use elefunt::machine;
/// # use elefunt::random::RandomSource;
/// #
/// let machine = machine::probe::<f64>();
/// let mut rng = RandomSource::new();
///
/// let phase = Phase::new(
///     "sqrt(x) vs x / sqrt(x)",
///     Domain::new(1.0, 2.0).unwrap(),
///     Relation::new(f64::sqrt, |x: f64| x / x.sqrt()),
/// );
///
/// let stats = harness::run_accuracy_phase(&phase, &machine, &mut rng);
///
/// assert_eq!(stats.larger + stats.agreed + stats.smaller, 2000);
/// assert!(stats.max_error.loss < 2.0);
/// ```
pub fn run_accuracy_phase<T>(
    phase: &Phase,
    machine: &MachineParams<T>,
    rng: &mut RandomSource,
) -> TrialStatistics {
    let n = phase.trials.get();
    let Domain { left, right } = phase.domain;

    let width = right - left;
    let cell = width / f64::from(n);

    log::info!("phase `{}` on {} ({n} trials)", phase.title, phase.domain);

    let mut origin = left;
    let mut acc = Accumulator::new();

    for _ in 0..n {
        let x = match phase.sampling {
            Sampling::Uniform => left + width * rng.draw(),
            Sampling::Stratified => {
                let x = cell * rng.draw() + origin;

                origin += cell;

                x
            }
        };

        let eval = phase.identity.evaluate(x, rng);
        let w = stats::relative_error(eval.reference, eval.candidate);

        log::trace!(
            "x = {}: reference {:e}, candidate {:e}, w = {w:e}",
            eval.argument,
            eval.reference,
            eval.candidate
        );

        acc.record(eval.argument, w);
    }

    let stats = acc.finish(machine);

    log::debug!(
        "phase `{}`: {}/{}/{} max {:e} ({:.2} digits lost) rms {:e}",
        phase.title,
        stats.larger,
        stats.agreed,
        stats.smaller,
        stats.max_error.value,
        stats.max_error.loss,
        stats.rms_error.value
    );

    stats
}
