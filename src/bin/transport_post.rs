//! Render the transport comparison figures from solver output in the
//! current directory
//!
//! ```text
//! transport-post [case1] [case2] [solvers]
//! ```
//!
//! With no target, `case1` and `case2` are processed. Set `RUST_LOG` to
//! change the log level (default `info`).

use std::error::Error;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transport_post::case::{Case, CaseConfig, SolverComparisonConfig};
use transport_post::pipeline::{run_case, run_solver_comparison};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Case(Case),
    Solvers,
}

fn parse_target(name: &str) -> Result<Target, String> {
    if name == "solvers" {
        return Ok(Target::Solvers);
    }
    Case::from_name(name)
        .map(Target::Case)
        .ok_or_else(|| format!("unknown target '{}', expected case1, case2 or solvers", name))
}

fn run(target: Target) -> Result<(), Box<dyn Error>> {
    let written = match target {
        Target::Case(case) => run_case(&CaseConfig::new(case))?.written,
        Target::Solvers => run_solver_comparison(&SolverComparisonConfig::default())?,
    };
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let targets = if args.is_empty() {
        vec![Target::Case(Case::Advected), Target::Case(Case::Stationary)]
    } else {
        args.iter()
            .map(|arg| parse_target(arg))
            .collect::<Result<Vec<_>, _>>()?
    };

    for target in targets {
        if let Err(err) = run(target) {
            error!("{}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            return Err(err);
        }
    }

    info!("all targets done");
    Ok(())
}
