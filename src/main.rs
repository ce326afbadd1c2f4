//! `nichart [--config FILE] [--reference CSV]... [--user CSV]...`

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use nichart::{init_logging, run_dashboard, DashboardConfig, DataSources};

const USAGE: &str = "usage: nichart [--config FILE] [--reference CSV]... [--user CSV]...";

struct Args {
    config: Option<PathBuf>,
    sources: DataSources,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        config: None,
        sources: DataSources::default(),
    };
    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .map(PathBuf::from)
                .ok_or_else(|| format!("{flag} expects a path"))
        };
        match flag.as_str() {
            "--config" | "-c" => parsed.config = Some(value()?),
            "--reference" | "-r" => parsed.sources.reference.push(value()?),
            "--user" | "-u" => parsed.sources.user.push(value()?),
            "--help" | "-h" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument '{other}'\n{USAGE}")),
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    init_logging();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let config = match &args.config {
        Some(path) => match DashboardConfig::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!(path = %path.display(), error = %e, "cannot load config");
                return ExitCode::FAILURE;
            }
        },
        None => DashboardConfig::default(),
    };
    info!(panels = config.panel_count, "starting dashboard");

    match run_dashboard(config, args.sources) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "dashboard exited with an error");
            ExitCode::FAILURE
        }
    }
}
