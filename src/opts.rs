use std::num::NonZeroU32;

use argh::FromArgs;
use log::LevelFilter;

use crate::functions::Function;
use crate::harness::{self, Sampling};
use crate::random;

/// Accuracy tests for elementary functions.
#[derive(FromArgs)]
pub struct Opts {
    /// functions to test (default: all)
    #[argh(positional)]
    pub functions: Vec<Function>,

    /// random arguments per test interval
    #[argh(option, short = 'n', default = "harness::DEFAULT_TRIALS")]
    pub trials: NonZeroU32,

    /// seed of the argument generator
    #[argh(option, default = "random::DEFAULT_SEED")]
    pub seed: u32,

    /// argument layout: uniform or stratified
    #[argh(option, default = "Sampling::Stratified")]
    pub sampling: Sampling,

    /// print the floating-point characteristics first
    #[argh(switch)]
    pub machine: bool,

    /// logging level
    #[argh(option, long = "log", default = "LevelFilter::Warn")]
    pub log_level: LevelFilter,
}

impl Opts {
    /// Parse options from `env::args`.
    pub fn parse() -> Opts {
        argh::from_env()
    }
}
