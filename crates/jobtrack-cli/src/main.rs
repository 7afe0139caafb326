use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Jobtrack CLI - track job applications against a Jobtrack server", long_about = None)]
struct Cli {
    /// Server URL (overrides config and JOBTRACK_API_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file (default: ~/.config/jobtrack/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    login: LoginArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Credentials used when no server session exists yet.
#[derive(Args, Clone, Default)]
pub struct LoginArgs {
    #[arg(long, short = 'u', global = true, env = "JOBTRACK_USERNAME")]
    pub username: Option<String>,

    #[arg(long, short = 'p', global = true, env = "JOBTRACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Search, status filter and sort of the list view.
#[derive(Args, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive match on company, position or resume
    #[arg(long)]
    pub search: Option<String>,

    /// Exact status, e.g. "interview"
    #[arg(long)]
    pub status: Option<String>,

    /// date_applied, company, position or status
    #[arg(long)]
    pub sort: Option<String>,

    /// Ascending order (default is descending)
    #[arg(long)]
    pub asc: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the logged-in user
    Whoami,
    /// Create an account and log in
    Register {
        #[arg(long)]
        email: String,
        /// Password confirmation (defaults to --password)
        #[arg(long)]
        confirm: Option<String>,
    },
    /// End the server session
    Logout,
    /// List applications
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Add an application
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        position: String,
        #[arg(long)]
        resume: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Change fields of an application
    Edit {
        id: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        resume: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Edit notes and reminder of an application
    Notes {
        id: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        reminder_date: Option<String>,
        #[arg(long)]
        reminder_text: Option<String>,
    },
    /// Delete an application
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Totals, per-status counts and recent activity
    Stats,
    /// Applications grouped by month
    Timeline {
        /// YYYY-MM or "all"
        #[arg(long)]
        month: Option<String>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Write applications to a CSV or JSON file
    Export {
        /// csv or json
        #[arg(long, default_value = "csv")]
        format: String,
        /// Leave out notes and reminder fields
        #[arg(long)]
        no_extended: bool,
        /// Export the searched/filtered view instead of everything
        #[arg(long)]
        filtered: bool,
        #[command(flatten)]
        view: ViewArgs,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = commands::context::load_config(cli.config.as_deref(), cli.base_url.as_deref())?;
    commands::context::init_tracing(&config.log_level);

    let ctx = commands::context::AppContext::new(config)?;
    let login = cli.login;

    match cli.command {
        Commands::Whoami => commands::auth::whoami(&ctx, &login).await?,
        Commands::Register { email, confirm } => {
            commands::auth::register(&ctx, &login, email, confirm).await?
        }
        Commands::Logout => commands::auth::logout(&ctx, &login).await?,
        Commands::List { view } => commands::jobs::list(&ctx, &login, &view).await?,
        Commands::Add {
            company,
            position,
            resume,
            date,
            status,
        } => {
            let fields = commands::jobs::JobFields {
                company: Some(company),
                position: Some(position),
                resume,
                date,
                status,
            };
            commands::jobs::add(&ctx, &login, fields).await?
        }
        Commands::Edit {
            id,
            company,
            position,
            resume,
            date,
            status,
        } => {
            let fields = commands::jobs::JobFields {
                company,
                position,
                resume,
                date,
                status,
            };
            commands::jobs::edit(&ctx, &login, &id, fields).await?
        }
        Commands::Notes {
            id,
            notes,
            reminder_date,
            reminder_text,
        } => {
            commands::jobs::notes(&ctx, &login, &id, notes, reminder_date, reminder_text).await?
        }
        Commands::Delete { id, yes } => commands::jobs::delete(&ctx, &login, &id, yes).await?,
        Commands::Stats => commands::report::stats(&ctx, &login).await?,
        Commands::Timeline { month, view } => {
            commands::report::timeline(&ctx, &login, month.as_deref(), &view).await?
        }
        Commands::Export {
            format,
            no_extended,
            filtered,
            view,
            out,
        } => {
            commands::report::export(&ctx, &login, &format, !no_extended, filtered, &view, &out)
                .await?
        }
        Commands::Config => commands::config::show(&ctx.config)?,
    }

    Ok(())
}
