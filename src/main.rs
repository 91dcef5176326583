use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use woofadaar_points::gamification::{is_weekend, ContextFlags, RegionalContext};

mod cli;

#[derive(Parser)]
#[command(name = "woofadaar-points")]
#[command(about = "Woofadaar points, levels and achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.woofadaar/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the ledger file (defaults to settings.ledger_path)
    #[arg(short, long, global = true)]
    ledger: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Context of the moment an action happens
#[derive(Args, Debug, Clone, Default)]
struct ContextOpts {
    /// User joined recently
    #[arg(long)]
    new_user: bool,
    #[arg(long)]
    premium: bool,
    /// Verified expert
    #[arg(long)]
    expert: bool,
    #[arg(long)]
    community_leader: bool,
    /// A festival period is running
    #[arg(long)]
    festival_period: bool,
    /// Force the weekend factor (otherwise derived from today's date)
    #[arg(long)]
    weekend: bool,
    /// It is the dog's birthday month
    #[arg(long)]
    birthday_month: bool,

    /// User's city (major cities earn a bonus)
    #[arg(long)]
    city: Option<String>,
    /// Festival being celebrated
    #[arg(long)]
    festival: Option<String>,
    /// Dog's breed (native breeds earn a bonus)
    #[arg(long)]
    breed: Option<String>,
}

impl ContextOpts {
    fn flags(&self, today: NaiveDate) -> ContextFlags {
        ContextFlags {
            is_new_user: self.new_user,
            is_premium: self.premium,
            is_expert: self.expert,
            is_community_leader: self.community_leader,
            is_festival_period: self.festival_period,
            is_weekend: self.weekend || is_weekend(today),
            is_birthday_month: self.birthday_month,
        }
    }

    fn region(&self) -> RegionalContext {
        RegionalContext {
            city: self.city.clone(),
            festival: self.festival.clone(),
            breed: self.breed.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Preview the points an action would earn
    Points {
        /// Action id (e.g. questionPost, bestAnswer)
        action: String,

        #[command(flatten)]
        context: ContextOpts,

        /// Lifetime points before the award
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        lifetime: i64,

        #[arg(long)]
        json: bool,
    },

    /// Resolve the level for a lifetime point total
    Level {
        #[arg(allow_negative_numbers = true)]
        points: i64,

        #[arg(long)]
        json: bool,
    },

    /// Evaluate standalone achievements against a stats snapshot
    Achievements {
        /// Stats snapshot JSON file
        #[arg(long)]
        stats: PathBuf,

        /// Already unlocked achievement ids (comma separated)
        #[arg(long, value_delimiter = ',')]
        unlocked: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Evaluate chain progress for a ledger user without recording it
    Chains {
        #[arg(long)]
        user: String,

        /// Stats snapshot JSON file
        #[arg(long)]
        stats: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Record an action: award points, unlock achievements, advance chains
    Award {
        #[arg(long)]
        user: String,

        #[arg(long)]
        action: String,

        /// Id of the post, answer or record that triggered the action
        #[arg(long)]
        source_id: String,

        #[command(flatten)]
        context: ContextOpts,

        /// Stats snapshot JSON file; achievements are skipped without it
        #[arg(long)]
        stats: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// List the configured catalog
    Catalog {
        /// Include hidden achievements
        #[arg(long)]
        hidden: bool,

        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration to the config path
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = match cli.command {
        Commands::Init { force } => return cli::init::init_command(cli.config, force),
        command => command,
    };

    let config = cli::load_config(cli.config.as_deref())?;

    match command {
        Commands::Points {
            action,
            context,
            lifetime,
            json,
        } => {
            cli::points::points_command(
                &config,
                cli::points::PointsArgs {
                    action,
                    flags: context.flags(Utc::now().date_naive()),
                    region: context.region(),
                    lifetime,
                    json,
                },
            )?;
        }
        Commands::Level { points, json } => {
            cli::level::level_command(&config, points, json)?;
        }
        Commands::Achievements {
            stats,
            unlocked,
            json,
        } => {
            cli::achievements::achievements_command(
                &config,
                cli::achievements::AchievementsArgs {
                    stats,
                    unlocked,
                    json,
                },
            )?;
        }
        Commands::Chains { user, stats, json } => {
            cli::chains::chains_command(
                &config,
                cli::chains::ChainsArgs {
                    user,
                    stats,
                    ledger: cli.ledger,
                    json,
                },
            )?;
        }
        Commands::Award {
            user,
            action,
            source_id,
            context,
            stats,
            json,
        } => {
            cli::award::award_command(
                &config,
                cli::award::AwardArgs {
                    user,
                    action,
                    source_id,
                    flags: context.flags(Utc::now().date_naive()),
                    region: context.region(),
                    stats,
                    ledger: cli.ledger,
                    json,
                },
            )?;
        }
        Commands::Catalog { hidden, json } => {
            cli::catalog::catalog_command(&config, hidden, json)?;
        }
        Commands::Init { .. } => {}
    }

    Ok(())
}
