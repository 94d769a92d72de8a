use std::io::{self, Write};
use std::process::ExitCode;

use itertools::Itertools;

use elefunt::functions::{self, Function, SuiteOptions};
use elefunt::machine::{self, MachineParams};
use elefunt::opts::Opts;
use elefunt::random::RandomSource;
use elefunt::report;

fn run(opts: &Opts) -> Result<(), Box<dyn std::error::Error>> {
    let params: MachineParams = machine::probe();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if opts.machine {
        report::write_machine("f64", &params, &mut out)?;
        report::write_machine("f32", &machine::probe::<f32>(), &mut out)?;
    }

    let selected = if opts.functions.is_empty() {
        Function::ALL
    } else {
        &opts.functions[..]
    };

    log::info!("testing {}", selected.iter().join(", "));

    let options = SuiteOptions {
        trials: opts.trials,
        sampling: opts.sampling,
    };

    for &function in selected {
        let mut rng = RandomSource::with_seed(opts.seed)?;
        let suite =
            functions::run_suite(function, &params, &mut rng, &options)?;

        report::write_suite(&suite, &params, &mut out)?;
    }

    out.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level)
        .init();

    if let Err(err) = run(&opts) {
        eprintln!("error: {err}");

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
