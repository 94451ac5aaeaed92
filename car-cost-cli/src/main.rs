use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};

use car_cost_cli::app::{self, ProfileSource};
use car_cost_cli::logging;
use car_cost_core::db::DbConfig;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Total cost of car ownership over several years.
///
/// Projects yearly costs (tax, financing, insurance, maintenance, fuel) and
/// the resulting resale value, debt and patrimony for one or more car
/// profiles.
#[derive(Debug, Parser)]
#[command(name = "car-cost", version)]
struct Cli {
    /// Database backend used for the query log.
    #[arg(long, env = "CAR_COST_DB_BACKEND", default_value = "sqlite", global = true)]
    backend: String,

    /// Database connection string.
    /// For SQLite this is a file path (e.g. `car_cost.db`) or `:memory:`.
    #[arg(long, env = "CAR_COST_DB", default_value = "car_cost.db", global = true)]
    db: String,

    /// Log filter, a level ("debug") or a full directive ("info,car_cost_core=debug").
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project the cost of one or more car profiles.
    Project(ProjectArgs),

    /// List recorded profiles, newest first.
    History {
        /// Maximum number of entries.
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[derive(Debug, Args)]
struct ProjectArgs {
    /// TOML profile file. Without a file the reference profile is used.
    #[arg(long, conflicts_with = "csv")]
    profile: Option<PathBuf>,

    /// CSV file with one profile per row.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Do not record shared profiles in the query log.
    #[arg(long)]
    no_save: bool,
}

impl ProjectArgs {
    fn source(&self) -> ProfileSource {
        match (&self.profile, &self.csv) {
            (Some(path), _) => ProfileSource::Toml(path.clone()),
            (None, Some(path)) => ProfileSource::Csv(path.clone()),
            (None, None) => ProfileSource::Reference,
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let db_config = DbConfig::new(cli.backend, cli.db);
    let registry = app::build_registry();

    match cli.command {
        Command::Project(args) => {
            let profiles = app::load_profiles(&args.source())?;

            let repo = if args.no_save {
                None
            } else {
                debug!("connecting to {} backend", db_config.backend);
                match registry.create(&db_config).await {
                    Ok(repo) => Some(repo),
                    Err(error) => {
                        warn!(%error, "query log unavailable, profiles will not be recorded");
                        None
                    }
                }
            };

            let output = app::run_project(&profiles, repo.as_deref()).await?;
            println!("{output}");
            info!(count = profiles.len(), "projection complete");
        }
        Command::History { limit } => {
            let repo = registry
                .create(&db_config)
                .await
                .with_context(|| format!("Cannot open query log '{}'", db_config.connection_string))?;
            let output = app::run_history(repo.as_ref(), limit).await?;
            print!("{output}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn project_defaults_to_reference_profile() {
        let cli = Cli::try_parse_from(["car-cost", "project"]).unwrap();

        match cli.command {
            Command::Project(args) => {
                assert_eq!(args.source(), ProfileSource::Reference);
                assert!(!args.no_save);
            }
            other => panic!("expected project, got {other:?}"),
        }
    }

    #[test]
    fn profile_and_csv_are_exclusive() {
        let result = Cli::try_parse_from([
            "car-cost", "project", "--profile", "a.toml", "--csv", "b.csv",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "car-cost", "history", "--limit", "3", "--db", ":memory:", "--backend", "sqlite",
        ])
        .unwrap();

        assert_eq!(cli.db, ":memory:");
        assert!(matches!(cli.command, Command::History { limit: 3 }));
    }
}
