//! Plain-text reports.

use std::io;

use itertools::Itertools;

use crate::functions::{Check, PhaseReport, SuiteReport};
use crate::harness::ErrorEstimate;
use crate::machine::{Arithmetic, MachineParams, Rounding};

/// Writes the probed characteristics of a floating-point representation.
pub fn write_machine<T, W>(
    name: &str,
    params: &MachineParams<T>,
    out: &mut W,
) -> io::Result<()>
where
    T: Arithmetic,
    W: io::Write,
{
    let rounding = match params.rounding() {
        Rounding::Chop => "chopped",
        Rounding::Round => "rounded",
        Rounding::Ieee => "IEEE round to nearest",
    };

    let underflow = if params.partial_underflow() {
        "gradual underflow"
    } else {
        "flush to zero"
    };

    writeln!(out, "Machine characteristics of {name}")?;
    writeln!(out)?;
    writeln!(out, "  ibeta  = {}", params.ibeta)?;
    writeln!(out, "  it     = {}", params.it)?;
    writeln!(
        out,
        "  irnd   = {} ({})",
        params.irnd,
        [rounding, underflow].iter().join(", ")
    )?;
    writeln!(out, "  ngrd   = {}", params.ngrd)?;
    writeln!(out, "  machep = {}", params.machep)?;
    writeln!(out, "  negep  = {}", params.negep)?;
    writeln!(out, "  iexp   = {}", params.iexp)?;
    writeln!(out, "  minexp = {}", params.minexp)?;
    writeln!(out, "  maxexp = {}", params.maxexp)?;
    writeln!(out, "  eps    = {:.16e}", params.eps.to_f64())?;
    writeln!(out, "  epsneg = {:.16e}", params.epsneg.to_f64())?;
    writeln!(out, "  xmin   = {:.16e}", params.xmin.to_f64())?;
    writeln!(out, "  xmax   = {:.16e}", params.xmax.to_f64())?;
    writeln!(out)
}

/// Writes every phase and special check of a suite.
pub fn write_suite<T, W>(
    report: &SuiteReport,
    machine: &MachineParams<T>,
    out: &mut W,
) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(out, "Accuracy of {}", report.function.title())?;
    writeln!(out)?;

    for phase in &report.phases {
        write_phase(phase, machine, out)?;
    }

    if !report.checks.is_empty() {
        writeln!(out, "Special tests")?;
        writeln!(out)?;
    }

    for check in &report.checks {
        write_check(check, out)?;
    }

    Ok(())
}

fn write_phase<T, W>(
    phase: &PhaseReport,
    machine: &MachineParams<T>,
    out: &mut W,
) -> io::Result<()>
where
    W: io::Write,
{
    let stats = &phase.statistics;

    writeln!(out, "Test of {}", phase.title)?;
    writeln!(out)?;
    writeln!(
        out,
        "  {} random arguments were tested from the interval {}",
        stats.trials, phase.domain
    )?;
    writeln!(out)?;
    writeln!(out, "  the reference was larger {:6} times,", stats.larger)?;
    writeln!(out, "                    agreed {:6} times, and", stats.agreed)?;
    writeln!(out, "               was smaller {:6} times.", stats.smaller)?;
    writeln!(out)?;

    if stats.invalid > 0 {
        writeln!(
            out,
            "  {} of the agreed trials had a NaN relative error",
            stats.invalid
        )?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "  there are {} base {} significant digits in a floating-point number",
        machine.it, machine.ibeta
    )?;
    writeln!(out)?;

    write_estimate(
        "the maximum relative error",
        &stats.max_error,
        machine,
        out,
    )?;
    writeln!(out, "      occurred for x = {}", stats.max_error_at)?;
    write_loss(&stats.max_error, machine, out)?;
    writeln!(out)?;

    write_estimate(
        "the root mean square relative error",
        &stats.rms_error,
        machine,
        out,
    )?;
    write_loss(&stats.rms_error, machine, out)?;
    writeln!(out)
}

fn write_estimate<T, W>(
    what: &str,
    estimate: &ErrorEstimate,
    machine: &MachineParams<T>,
    out: &mut W,
) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        out,
        "  {what} was {:.4e} = {} ** {:.2}",
        estimate.value, machine.ibeta, estimate.exponent
    )
}

fn write_loss<T, W>(
    estimate: &ErrorEstimate,
    machine: &MachineParams<T>,
    out: &mut W,
) -> io::Result<()>
where
    W: io::Write,
{
    writeln!(
        out,
        "  the estimated loss of base {} significant digits is {:.2}",
        machine.ibeta, estimate.loss
    )
}

fn write_check<W: io::Write>(check: &Check, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", check.title)?;

    for value in &check.values {
        writeln!(
            out,
            "  {:<32} {:>48}  {:e}",
            value.label,
            value.argument.to_string(),
            value.result
        )?;
    }

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::functions::{self, Function, SuiteOptions};
    use crate::harness::{self, Accumulator, Argument, Domain, Sampling};
    use crate::harness::{Phase, Relation};
    use crate::machine;
    use crate::random::RandomSource;

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();

        write(&mut out).unwrap();

        String::from_utf8(out).unwrap()
    }

    #[test]
    fn machine_table() {
        let params = machine::probe::<f64>();
        let text = render(|out| write_machine("f64", &params, out));

        assert!(text.starts_with("Machine characteristics of f64"));
        assert!(text.contains("  it     = 53\n"));
        assert!(text.contains("IEEE round to nearest, gradual underflow"));
        assert!(text.contains("  maxexp = 1024\n"));
    }

    #[test]
    fn suite_blocks() {
        let machine = machine::probe::<f64>();
        let mut rng = RandomSource::new();

        let options = SuiteOptions {
            trials: NonZeroU32::new(20).unwrap(),
            sampling: Sampling::Stratified,
        };

        let report =
            functions::run_suite(Function::Sqrt, &machine, &mut rng, &options)
                .unwrap();

        let text = render(|out| write_suite(&report, &machine, out));

        assert!(text.starts_with("Accuracy of sqrt"));
        assert_eq!(text.matches("Test of sqrt(x) vs x / sqrt(x)").count(), 2);
        assert_eq!(text.matches("20 random arguments").count(), 2);
        assert!(text.contains("there are 53 base 2 significant digits"));
        assert!(text.contains("Special tests"));
        assert!(text.contains("sqrt(-1), NaN expected"));

        // The maximum error is reported before the RMS error.
        let max = text.find("the maximum relative error").unwrap();
        let rms = text.find("the root mean square").unwrap();

        assert!(max < rms);
    }

    #[test]
    fn exact_phase_uses_sentinel() {
        let machine = machine::probe::<f64>();
        let mut acc = Accumulator::new();

        for x in [0.25, 0.5, 0.75] {
            acc.record(Argument::Unary(x), 0.0);
        }

        let phase = PhaseReport {
            title: "x vs x".to_owned(),
            domain: Domain::new(0.0, 1.0).unwrap(),
            statistics: acc.finish(&machine),
        };

        let text = render(|out| write_phase(&phase, &machine, out));

        assert!(text.contains("3 random arguments"));
        assert!(text.contains("agreed      3 times"));
        assert_eq!(text.matches("2 ** -999.00").count(), 2);
        assert_eq!(text.matches("digits is -999.00").count(), 2);
        assert!(!text.contains("NaN relative error"));
    }

    #[test]
    fn nan_candidate_is_reported() {
        let machine = machine::probe::<f64>();
        let mut rng = RandomSource::new();

        let phase = Phase::new(
            "sqrt(x) vs nothing",
            Domain::new(1.0, 2.0).unwrap(),
            Relation::new(f64::sqrt, |_| f64::NAN),
        )
        .with_trials(NonZeroU32::new(10).unwrap());

        let phase = PhaseReport {
            title: phase.title.clone(),
            domain: phase.domain,
            statistics: harness::run_accuracy_phase(&phase, &machine, &mut rng),
        };

        let text = render(|out| write_phase(&phase, &machine, out));

        assert!(text.contains("10 of the agreed trials had a NaN"));
        assert!(text.contains("square relative error was NaN = 2 ** NaN"));
        assert!(text.contains("digits is NaN"));
    }
}
