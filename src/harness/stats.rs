//! Error statistics for accuracy phases.

use crate::machine::MachineParams;

use super::Argument;

/// Reported in place of a logarithm when the error is exactly zero.
pub const UNMEASURABLE: f64 = -999.0;

/// Relative error of `candidate` against `reference`.
///
/// A zero reference yields 1 regardless of the candidate.
///
/// # Examples
///
/// ```
/// # use elefunt::harness::stats::relative_error;
/// #
/// assert_eq!(relative_error(2.0, 1.0), 0.5);
/// assert_eq!(relative_error(2.0, 3.0), -0.5);
/// assert_eq!(relative_error(0.0, 3.0), 1.0);
/// ```
pub fn relative_error(reference: f64, candidate: f64) -> f64 {
    if reference != 0.0 {
        (reference - candidate) / reference
    } else {
        1.0
    }
}

/// Base-`ibeta` logarithm of `|e|`. NaN propagates.
pub fn radix_exponent<T>(e: f64, machine: &MachineParams<T>) -> f64 {
    if e == 0.0 {
        UNMEASURABLE
    } else {
        e.abs().ln() / machine.ln_beta()
    }
}

/// Number of base-`ibeta` digits lost to an error of size `e`.
///
/// A NaN error yields NaN rather than a loss of zero.
pub fn digit_loss<T>(e: f64, machine: &MachineParams<T>) -> f64 {
    if e == 0.0 {
        UNMEASURABLE
    } else if e.is_nan() {
        f64::NAN
    } else {
        (f64::from(machine.it) + radix_exponent(e, machine)).max(0.0)
    }
}

/// An error value together with its size in radix digits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorEstimate {
    pub value: f64,
    pub exponent: f64,
    pub loss: f64,
}

impl ErrorEstimate {
    pub fn new<T>(value: f64, machine: &MachineParams<T>) -> ErrorEstimate {
        ErrorEstimate {
            value,
            exponent: radix_exponent(value, machine),
            loss: digit_loss(value, machine),
        }
    }
}

/// Summary of one accuracy phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialStatistics {
    pub trials: u32,
    /// Trials where the reference exceeded the candidate.
    pub larger: u32,
    pub agreed: u32,
    /// Trials where the candidate exceeded the reference.
    pub smaller: u32,
    /// Trials whose relative error was NaN. These are also counted in
    /// `agreed`.
    pub invalid: u32,
    pub max_error: ErrorEstimate,
    pub max_error_at: Argument,
    pub rms_error: ErrorEstimate,
}

/// Running totals for a stream of relative errors.
///
/// Accumulators over disjoint sub-streams can be combined with
/// [`Accumulator::merge`]; merging in a fixed order gives reproducible
/// results.
#[derive(Clone, Debug, Default)]
pub struct Accumulator {
    trials: u32,
    larger: u32,
    smaller: u32,
    invalid: u32,
    max_error: f64,
    max_error_at: Argument,
    sum_squares: f64,
}

impl Accumulator {
    pub fn new() -> Accumulator {
        Default::default()
    }

    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Records the relative error `w` observed at `argument`.
    pub fn record(&mut self, argument: Argument, w: f64) {
        self.trials += 1;

        if w > 0.0 {
            self.larger += 1;
        } else if w < 0.0 {
            self.smaller += 1;
        } else if w.is_nan() {
            self.invalid += 1;
        }

        let magnitude = w.abs();

        if magnitude > self.max_error {
            self.max_error = magnitude;
            self.max_error_at = argument;
        }

        self.sum_squares += w * w;
    }

    /// Folds in the totals of `other`. On a tied maximum the receiver's
    /// argument is kept.
    pub fn merge(&mut self, other: &Accumulator) {
        self.trials += other.trials;
        self.larger += other.larger;
        self.smaller += other.smaller;
        self.invalid += other.invalid;

        if other.max_error > self.max_error {
            self.max_error = other.max_error;
            self.max_error_at = other.max_error_at;
        }

        self.sum_squares += other.sum_squares;
    }

    pub fn finish<T>(&self, machine: &MachineParams<T>) -> TrialStatistics {
        let max_error = ErrorEstimate::new(self.max_error, machine);

        let rms = if self.trials == 0 {
            0.0
        } else {
            (self.sum_squares / f64::from(self.trials)).sqrt()
        };

        TrialStatistics {
            trials: self.trials,
            larger: self.larger,
            agreed: self.trials - self.larger - self.smaller,
            smaller: self.smaller,
            invalid: self.invalid,
            max_error,
            max_error_at: self.max_error_at,
            rms_error: ErrorEstimate::new(rms, machine),
        }
    }
}
