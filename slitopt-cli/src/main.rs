mod report;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use slitopt::form::{default_fields, parse_angulator};
use slitopt::{InstrumentGeometry, OptimizationRequest, angulator, optimize};

/// Slit settings for a neutron reflectometer.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Optimise both slits for a footprint and resolution at one angle
    Optimise {
        /// Maximum footprint onto the sample (mm)
        footprint: f64,
        /// Fractional dθ/θ resolution (FWHM)
        resolution: f64,
        /// Angle of incidence (degrees)
        #[arg(default_value_t = 1.0)]
        angle: f64,
        /// Slit 1 to slit 2 distance (mm), Platypus if omitted
        #[arg(long)]
        l12: Option<f64>,
        /// Slit 2 to sample distance (mm)
        #[arg(long)]
        l2s: Option<f64>,
        /// Sample to slit 4 distance (mm)
        #[arg(long)]
        ls4: Option<f64>,
        /// Sample to detector distance (mm)
        #[arg(long)]
        lsd: Option<f64>,
    },
    /// Slit openings, Q range and beam heights for a list of angles
    Angulator {
        /// JSON object of form fields; the calculator defaults if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Set a form field, e.g. `--set a4=3.2`
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Read a JSON object of form fields. Numbers and strings are accepted.
fn read_config(path: &Path) -> Result<BTreeMap<String, String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&contents)
        .with_context(|| format!("config file {} is not a JSON object", path.display()))?;

    let mut fields = BTreeMap::new();
    for (key, value) in raw {
        let text = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Null => continue,
            other => bail!("field '{key}' must be a number or a string, got {other}"),
        };
        fields.insert(key, text);
    }
    Ok(fields)
}

fn apply_overrides(fields: &mut BTreeMap<String, String>, overrides: &[String]) -> Result<()> {
    for item in overrides {
        let Some((key, value)) = item.split_once('=') else {
            bail!("expected KEY=VALUE, got '{item}'");
        };
        fields.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Optimise {
            footprint,
            resolution,
            angle,
            l12,
            l2s,
            ls4,
            lsd,
        } => {
            let platypus = InstrumentGeometry::platypus();
            let mut geometry = InstrumentGeometry::new(
                l12.unwrap_or(platypus.slit1_slit2),
                l2s.unwrap_or(platypus.slit2_sample),
            )?;
            for (given, preset) in [ls4, lsd].into_iter().zip(&platypus.downstream) {
                geometry = geometry.with_position(
                    preset.name.clone(),
                    given.unwrap_or(preset.distance_from_sample),
                )?;
            }

            let request = OptimizationRequest::new(footprint, resolution, angle, geometry)?;
            let slit_report = optimize(&request).context("slit optimisation failed")?;
            print!(
                "{}",
                report::Optimisation {
                    request: &request,
                    report: &slit_report,
                }
            );
        }
        Command::Angulator {
            config,
            fields: overrides,
            json,
        } => {
            let mut fields = match config {
                Some(path) => read_config(&path)?,
                None => default_fields(),
            };
            apply_overrides(&mut fields, &overrides)?;

            let request = parse_angulator(&fields).context("invalid calculator form")?;
            let result = angulator(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::AngleTable(&result));
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides() {
        let mut fields = default_fields();
        apply_overrides(&mut fields, &["a4 = 3.2".to_string(), "L2S=300".to_string()]).unwrap();
        assert_eq!(fields["a4"], "3.2");
        assert_eq!(fields["L2S"], "300");
        assert!(apply_overrides(&mut fields, &["a5".to_string()]).is_err());
    }

    #[test]
    fn test_cli_parses_optimise() {
        let cli = Cli::try_parse_from(["slitopt", "optimise", "50", "0.04", "2"]).unwrap();
        match cli.command {
            Command::Optimise {
                footprint, angle, ..
            } => {
                assert_eq!(footprint, 50.0);
                assert_eq!(angle, 2.0);
            }
            Command::Angulator { .. } => panic!("wrong sub-command"),
        }
    }
}
