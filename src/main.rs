//! `tout`: sample size and progression criteria for three-outcome pilot
//! trials.
//!
//! ```bash
//! # Binary outcome, default eta and unconstrained gamma
//! tout --rho-0 0.5 --rho-1 0.7 --alpha 0.05 --beta 0.2
//!
//! # Continuous outcome with a cap on the pause probability
//! tout --rho-0 0 --rho-1 0.5 --sigma 1 --alpha 0.05 --beta 0.2 --gamma 0.3
//!
//! # Design read from JSON, sizes evaluated eight at a time
//! tout --config design.json --window 8
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use toutcompute::compute::types::{DesignInput, DesignResult, SearchStrategy};
use toutcompute::compute::{ProgressionOptimizer, tout_design_with};
use toutcompute::error::ToutComputeErr;

/// Sample size and stop/pause/go thresholds for a pilot trial
#[derive(Parser, Debug)]
#[command(name = "tout", version)]
struct Args {
    /// Null hypothesis rate
    #[arg(long, allow_hyphen_values = true, required_unless_present = "config")]
    rho_0: Option<f64>,

    /// Alternative hypothesis rate
    #[arg(long, allow_hyphen_values = true, required_unless_present = "config")]
    rho_1: Option<f64>,

    /// Upper bound on the type I error rate
    #[arg(long, required_unless_present = "config")]
    alpha: Option<f64>,

    /// Upper bound on the type II error rate
    #[arg(long, required_unless_present = "config")]
    beta: Option<f64>,

    /// Upper bound on the pause probability (default 1, unconstrained)
    #[arg(long)]
    gamma: Option<f64>,

    /// Probability of proceeding after a pause when the null holds (default 0.5)
    #[arg(long)]
    eta_0: Option<f64>,

    /// Probability of stopping after a pause when the alternative holds
    /// (default eta_0)
    #[arg(long)]
    eta_1: Option<f64>,

    /// Range of adjustment effects
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_hyphen_values = true)]
    tau: Option<Vec<f64>>,

    /// Outcome standard deviation; omit for a binary outcome
    #[arg(long)]
    sigma: Option<f64>,

    /// Evaluate this sample size only
    #[arg(long)]
    n: Option<usize>,

    /// Evaluate these stop and go thresholds only
    #[arg(long, num_args = 2, value_names = ["X0", "X1"], allow_hyphen_values = true)]
    x: Option<Vec<f64>>,

    /// Largest sample size to search
    #[arg(long)]
    max_n: Option<usize>,

    /// Evaluate this many sample sizes in parallel at a time
    #[arg(long)]
    window: Option<usize>,

    /// Read the design from a JSON file instead of flags
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with_all = [
            "rho_0", "rho_1", "alpha", "beta", "gamma", "eta_0", "eta_1",
            "tau", "sigma", "n", "x", "max_n",
        ]
    )]
    config: Option<PathBuf>,
}

#[derive(Error, Debug)]
enum CliErr {
    #[error("{0}")]
    Compute(#[from] ToutComputeErr),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse design in {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("missing required argument --{0}")]
    MissingArg(&'static str),
    #[error("could not serialize result: {0}")]
    Output(serde_json::Error),
}

impl CliErr {
    /// 2 for anything wrong with the input, 1 otherwise
    fn exit_code(&self) -> u8 {
        match self {
            CliErr::Compute(err) if err.is_invalid_design() => 2,
            CliErr::Read { .. } | CliErr::Config { .. } | CliErr::MissingArg(_) => 2,
            _ => 1,
        }
    }
}

impl Args {
    fn design_input(&self) -> Result<DesignInput, CliErr> {
        if let Some(path) = &self.config {
            return read_config(path);
        }

        let rho_0 = self.rho_0.ok_or(CliErr::MissingArg("rho-0"))?;
        let rho_1 = self.rho_1.ok_or(CliErr::MissingArg("rho-1"))?;
        let alpha = self.alpha.ok_or(CliErr::MissingArg("alpha"))?;
        let beta = self.beta.ok_or(CliErr::MissingArg("beta"))?;

        let mut input = DesignInput::new(rho_0, rho_1, alpha, beta);
        if let Some(gamma) = self.gamma {
            input = input.with_gamma_nom(gamma);
        }
        if let Some(eta_0) = self.eta_0 {
            input = input.with_eta_0(eta_0);
        }
        if let Some(eta_1) = self.eta_1 {
            input = input.with_eta_1(eta_1);
        }
        if let Some([lower, upper]) = self.tau.as_deref().and_then(pair) {
            input = input.with_tau(lower, upper);
        }
        if let Some(sigma) = self.sigma {
            input = input.with_sigma(sigma);
        }
        if let Some(n) = self.n {
            input = input.with_n(n);
        }
        if let Some([x_0, x_1]) = self.x.as_deref().and_then(pair) {
            input = input.with_thresholds(x_0, x_1);
        }
        if let Some(max_n) = self.max_n {
            input = input.with_max_n(max_n);
        }
        Ok(input)
    }

    fn strategy(&self) -> SearchStrategy {
        match self.window {
            Some(window) => SearchStrategy::Windowed { window },
            None => SearchStrategy::Sequential,
        }
    }
}

fn pair(values: &[f64]) -> Option<[f64; 2]> {
    match values {
        [a, b] => Some([*a, *b]),
        _ => None,
    }
}

fn read_config(path: &Path) -> Result<DesignInput, CliErr> {
    let contents = fs::read_to_string(path).map_err(|source| CliErr::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliErr::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn run(args: &Args) -> Result<DesignResult, CliErr> {
    let input = args.design_input()?;
    let result = tout_design_with(&input, &ProgressionOptimizer::default(), args.strategy())?;
    Ok(result)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let output = run(&args).and_then(|result| {
        serde_json::to_string_pretty(&result).map_err(CliErr::Output)
    });

    match output {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tout").chain(args.iter().copied()))
            .expect("failed to parse arguments")
    }

    #[test]
    fn flags_build_design_input() {
        let args = parse(&[
            "--rho-0", "0.7", "--rho-1", "0.5", "--alpha", "0.05", "--beta", "0.1",
            "--gamma", "0.3", "--eta-0", "0.2", "--tau", "-0.1", "0", "--max-n", "80",
        ]);
        let expected = DesignInput::new(0.7, 0.5, 0.05, 0.1)
            .with_gamma_nom(0.3)
            .with_eta_0(0.2)
            .with_tau(-0.1, 0.0)
            .with_max_n(80);
        assert_eq!(args.design_input().unwrap(), expected);
        assert_eq!(args.strategy(), SearchStrategy::Sequential);
    }

    #[test]
    fn fixed_size_and_thresholds() {
        let args = parse(&[
            "--rho-0", "0", "--rho-1", "0.5", "--alpha", "0.05", "--beta", "0.2",
            "--sigma", "1", "--n", "30", "--x", "0.1", "0.3", "--window", "4",
        ]);
        let input = args.design_input().unwrap();
        assert_eq!(input.sigma, Some(1.0));
        assert_eq!(input.n, Some(30));
        assert_eq!(input.x, Some([0.1, 0.3]));
        assert_eq!(args.strategy(), SearchStrategy::Windowed { window: 4 });
    }

    #[test]
    fn config_conflicts_with_flags() {
        let res = Args::try_parse_from(["tout", "--config", "d.json", "--rho-0", "0.5"]);
        assert!(res.is_err());
    }

    #[test]
    fn rates_required_without_config() {
        assert!(Args::try_parse_from(["tout", "--rho-0", "0.5"]).is_err());
        assert!(Args::try_parse_from(["tout", "--config", "d.json"]).is_ok());
    }

    #[test]
    fn invalid_design_exit_code() {
        let args = parse(&["--rho-0", "0.5", "--rho-1", "0.5", "--alpha", "0.05", "--beta", "0.2"]);
        let err = run(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_config_file_exit_code() {
        let args = parse(&["--config", "/nonexistent/tout/design.json"]);
        let err = run(&args).unwrap_err();
        assert!(matches!(err, CliErr::Read { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn malformed_config_file_exit_code() {
        let path = std::env::temp_dir().join(format!("tout-malformed-{}.json", std::process::id()));
        fs::write(&path, "{ \"rho_0\": 0.5 ").unwrap();
        let err = read_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, CliErr::Config { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
