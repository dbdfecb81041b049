//! Obesity Predictor: questionnaire-to-category CLI.
//!
//! Reads one questionnaire submission as JSON and prints the predicted
//! obesity category.

use std::io::Read;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use obesity_predictor::adapters::sanitize::SanitizingMakeWriter;
use obesity_predictor::adapters::ArtifactSet;
use obesity_predictor::{AnalyticsService, FormSubmission, PredictionService, PredictorConfig};

const USAGE: &str = "\
Usage: obesity-predictor [ANSWERS.json|-] [--show-features] [--summary]

  ANSWERS.json      questionnaire answers as JSON ('-' or omitted: stdin;
                    with --summary alone no answers are read)
  --show-features   also print the encoded feature row
  --summary         print the reference dataset summary (needs OBESITY_DATASET_PATH)

Environment:
  OBESITY_ARTIFACT_DIR, OBESITY_NUMERIC_SCALING, OBESITY_EXTRA_COLUMNS,
  OBESITY_DATASET_PATH, OBESITY_LOG_MODE (stderr|file), OBESITY_LOG_FILE";

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    show_features: bool,
    summary: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--show-features" => args.show_features = true,
            "--summary" => args.summary = true,
            "-h" | "--help" => return Ok(None),
            "-" => args.input = Some(arg),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n\n{USAGE}"),
            _ => {
                if args.input.is_some() {
                    bail!("only one answers file may be given\n\n{USAGE}");
                }
                args.input = Some(arg);
            }
        }
    }
    Ok(Some(args))
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    // Stdout carries the prediction; logs go to stderr unless a file is requested.
    let log_mode = std::env::var("OBESITY_LOG_MODE").unwrap_or_else(|_| "stderr".to_string());

    let (writer, guard) = match log_mode.as_str() {
        "file" => {
            let log_file = std::env::var("OBESITY_LOG_FILE")
                .unwrap_or_else(|_| "obesity-predictor.log".to_string());

            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
                .with_context(|| format!("cannot open log file {log_file}"))?;
            tracing_appender::non_blocking(file)
        }
        "stderr" => tracing_appender::non_blocking(std::io::stderr()),
        other => bail!("OBESITY_LOG_MODE={other:?} is not one of stderr|file"),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    Ok(guard)
}

fn read_submission(input: Option<&str>) -> Result<FormSubmission> {
    let form = match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read answers from stdin")?;
            serde_json::from_str(&buf).context("answers are not a valid submission")?
        }
        Some(path) => {
            let file = std::fs::File::open(path).with_context(|| format!("cannot open {path}"))?;
            serde_json::from_reader(std::io::BufReader::new(file))
                .with_context(|| format!("{path} is not a valid submission"))?
        }
    };
    Ok(form)
}

fn main() -> Result<ExitCode> {
    let Some(args) = parse_args()? else {
        println!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    };

    let _guard = init_logging()?;
    tracing::info!("Starting obesity predictor...");

    let config = PredictorConfig::from_env()?;

    if args.summary {
        let path = config
            .dataset_path
            .as_deref()
            .context("--summary needs OBESITY_DATASET_PATH")?;
        let analytics = AnalyticsService::from_csv(path)
            .with_context(|| format!("cannot summarize {}", path.display()))?;
        println!("{}", serde_json::to_string_pretty(&analytics.summary())?);

        if args.input.is_none() {
            return Ok(ExitCode::SUCCESS);
        }
    }

    let artifacts = ArtifactSet::load(&config.artifact_dir, config.numeric_scaling)
        .with_context(|| format!("cannot load artifacts from {}", config.artifact_dir.display()))?;
    let service = PredictionService::from_artifacts(artifacts, config.extra_columns)
        .context("cannot start prediction service")?;

    let prediction = read_submission(args.input.as_deref()).and_then(|form| {
        service
            .predict_submission(&form)
            .map_err(anyhow::Error::from)
    });

    let prediction = match prediction {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("Submission rejected");
            eprintln!("prediction failed: {e:#}");
            return Ok(ExitCode::from(2));
        }
    };

    println!("{} ({})", prediction.class, prediction.class.label_pt());
    if args.show_features {
        println!("{}", serde_json::to_string_pretty(&prediction.features)?);
    }

    tracing::info!("Obesity predictor done.");
    Ok(ExitCode::SUCCESS)
}
