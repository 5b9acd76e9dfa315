use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// mealmuse - Family meal planning
#[derive(Parser)]
#[command(name = "mealmuse")]
#[command(about = "Plan family meals and build shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Show the next 14 days of meals
    Calendar,
    /// Put a meal on a day
    Assign {
        /// Day as yyyy-mm-dd
        #[arg(long)]
        date: String,

        /// Meal id
        #[arg(long)]
        meal: String,

        /// Only accept a meal marked as favorite
        #[arg(long)]
        favorite: bool,
    },
    /// Remove the meal planned on a day
    Unassign {
        #[arg(long)]
        date: String,
    },
    /// Move a planned meal to another day, replacing whatever is there
    Move {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },
    /// Ask the LLM for a meal and plan it on a day
    Generate {
        #[arg(long)]
        date: String,

        #[arg(long)]
        prompt: String,
    },
    /// Ask the LLM for meal ideas, optionally saving one to the meal list
    Suggest {
        #[arg(long)]
        prompt: String,

        /// Position of the suggestion to save, starting at 1
        #[arg(long)]
        save: Option<usize>,
    },
    /// List saved meals
    Meals {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Mark a meal as favorite
    Favorite {
        #[arg(long)]
        meal: String,

        /// Remove the mark instead
        #[arg(long)]
        off: bool,
    },
    /// Build the shopping list for planned meals
    Shopping {
        /// Plan ids to shop for (all plans in the window when omitted)
        #[arg(long = "plan")]
        plans: Vec<String>,

        /// Items already in the cart
        #[arg(long = "check")]
        checked: Vec<String>,
    },
    /// Meal and plan counts with the next few meals
    Stats,
    /// List and manage family members
    Family {
        #[command(subcommand)]
        action: Option<FamilyAction>,
    },
    /// Household cuisine and equipment preferences
    Preferences {
        #[command(subcommand)]
        action: PreferencesAction,
    },
}

#[derive(Subcommand)]
enum FamilyAction {
    /// Add a family member
    Add {
        #[command(flatten)]
        fields: cli::household::MemberFields,
    },
    /// Change the given fields of a family member
    Edit {
        id: String,

        #[command(flatten)]
        fields: cli::household::MemberFields,
    },
    /// Remove a family member
    Remove { id: String },
}

#[derive(Subcommand)]
enum PreferencesAction {
    /// Replace the saved preferences
    Set {
        /// Comma separated cuisines
        #[arg(long, default_value = "")]
        cuisines: String,

        /// Comma separated equipment
        #[arg(long, default_value = "")]
        equipment: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealmuse::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealmuse::observability::init_observability(
        "mealmuse",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let result = match cli.command {
        Commands::Migrate => cli::db::migrate(&config).await,
        Commands::Reset => cli::db::reset(&config).await,
        Commands::Calendar => cli::calendar::show(&config).await,
        Commands::Assign {
            date,
            meal,
            favorite,
        } => cli::calendar::assign(&config, &date, &meal, favorite).await,
        Commands::Unassign { date } => cli::calendar::unassign(&config, &date).await,
        Commands::Move { from, to } => cli::calendar::move_meal(&config, &from, &to).await,
        Commands::Generate { date, prompt } => {
            cli::calendar::generate(&config, &date, &prompt).await
        }
        Commands::Suggest { prompt, save } => {
            cli::household::suggest(&config, &prompt, save).await
        }
        Commands::Meals { favorites } => cli::household::meals(&config, favorites).await,
        Commands::Favorite { meal, off } => cli::household::favorite(&config, &meal, !off).await,
        Commands::Shopping { plans, checked } => {
            cli::shopping::show(&config, &plans, &checked).await
        }
        Commands::Stats => cli::dashboard::stats(&config).await,
        Commands::Family { action } => match action {
            None => cli::household::family(&config).await,
            Some(FamilyAction::Add { fields }) => cli::household::add_member(&config, fields).await,
            Some(FamilyAction::Edit { id, fields }) => {
                cli::household::edit_member(&config, &id, fields).await
            }
            Some(FamilyAction::Remove { id }) => cli::household::remove_member(&config, &id).await,
        },
        Commands::Preferences {
            action: PreferencesAction::Set {
                cuisines,
                equipment,
            },
        } => cli::household::set_preferences(&config, &cuisines, &equipment).await,
    };

    if let Err(err) = &result {
        tracing::error!("{err}");
    }

    result
}
