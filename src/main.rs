use log::{error, info, warn};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use dishcraft_enrich::{EnrichConfig, EnrichError, Enricher};

const USAGE: &str = "\
Usage:
  dishcraft-enrich [enrich] [--dry-run] [--store DIR]
  dishcraft-enrich seed FILE [--dry-run] [--store DIR]
  dishcraft-enrich stats [--store DIR]";

#[derive(Debug, PartialEq)]
enum Command {
    Enrich,
    Seed(PathBuf),
    Stats,
}

#[derive(Debug, PartialEq)]
struct Args {
    command: Command,
    dry_run: bool,
    store: Option<PathBuf>,
}

fn parse_args<I>(args: I) -> Result<Args, EnrichError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().peekable();
    let command = match args.peek().map(String::as_str) {
        Some("enrich") => {
            args.next();
            Command::Enrich
        }
        Some("seed") => {
            args.next();
            let file = args
                .next()
                .ok_or_else(|| EnrichError::UsageError("seed needs a FILE argument".to_string()))?;
            Command::Seed(PathBuf::from(file))
        }
        Some("stats") => {
            args.next();
            Command::Stats
        }
        _ => Command::Enrich,
    };

    let mut parsed = Args {
        command,
        dry_run: false,
        store: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dry-run" => parsed.dry_run = true,
            "--store" => {
                let dir = args
                    .next()
                    .ok_or_else(|| EnrichError::UsageError("--store needs a DIR".to_string()))?;
                parsed.store = Some(PathBuf::from(dir));
            }
            other => {
                return Err(EnrichError::UsageError(format!(
                    "unexpected argument '{}'",
                    other
                )))
            }
        }
    }

    Ok(parsed)
}

/// Follow-up line logged after a failed run
fn failure_hint(err: &EnrichError) -> Option<&'static str> {
    match err {
        EnrichError::QuotaExceeded(_) => {
            Some("upstream quota reached; the store was left unchanged, retry after the daily reset")
        }
        EnrichError::MissingApiKey => Some("run `seed FILE` to enrich without an API key"),
        e if e.is_upstream() => Some("upstream fetch failed; the store was left unchanged"),
        _ => None,
    }
}

async fn run(args: Args) -> Result<(), EnrichError> {
    let mut config = EnrichConfig::load()?;
    if let Some(dir) = args.store {
        config.store.dir = dir;
    }
    if args.dry_run {
        config.dry_run = true;
    }

    match args.command {
        Command::Stats => {
            let (ingredients, components) = dishcraft_enrich::store_stats(&config).await?;
            println!("ingredients: {}", ingredients);
            println!("components:  {}", components);
        }
        Command::Enrich => {
            let report = Enricher::builder().config(config).run().await?;
            print!("{}", report);
        }
        Command::Seed(file) => {
            let report = dishcraft_enrich::seed_from_file(&file, &config).await?;
            print!("{}", report);
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            if let Some(hint) = failure_hint(&e) {
                warn!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, EnrichError> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_default_command_is_enrich() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.command, Command::Enrich);
        assert!(!parsed.dry_run);
        assert_eq!(parsed.store, None);
    }

    #[test]
    fn test_flags_without_command() {
        let parsed = args(&["--dry-run", "--store", "/tmp/x"]).unwrap();
        assert_eq!(parsed.command, Command::Enrich);
        assert!(parsed.dry_run);
        assert_eq!(parsed.store, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_seed_command() {
        let parsed = args(&["seed", "pantry.json", "--dry-run"]).unwrap();
        assert_eq!(parsed.command, Command::Seed(PathBuf::from("pantry.json")));
        assert!(parsed.dry_run);
    }

    #[test]
    fn test_usage_errors() {
        assert!(matches!(args(&["seed"]), Err(EnrichError::UsageError(_))));
        assert!(matches!(args(&["--store"]), Err(EnrichError::UsageError(_))));
        assert!(matches!(args(&["stats", "--bogus"]), Err(EnrichError::UsageError(_))));
    }

    #[test]
    fn test_failure_hint() {
        assert!(failure_hint(&EnrichError::QuotaExceeded(402))
            .unwrap()
            .contains("quota"));
        assert_eq!(
            failure_hint(&EnrichError::UpstreamStatus {
                status: 500,
                body: String::new(),
            }),
            Some("upstream fetch failed; the store was left unchanged")
        );
        assert!(failure_hint(&EnrichError::MissingApiKey).is_some());
        assert_eq!(
            failure_hint(&EnrichError::StoreError("disk full".to_string())),
            None
        );
    }
}
