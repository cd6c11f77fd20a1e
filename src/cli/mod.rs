mod plan;
mod profile;
mod session;

use clap::{Parser, Subcommand};
use dialoguer::Password;
use mealcal::{HttpApi, Planner, config::Config};
use mealcal_mealplan::MealType;

/// mealcal - weekly meal plans from the command line
#[derive(Parser)]
#[command(name = "mealcal")]
#[command(about = "Sign in, generate and browse your weekly meal plans", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed in user and their preferences
    Whoami,
    /// Change the account password
    Password,
    /// Show the planned calendar, week by week
    Plans,
    /// Show today's meals
    Today,
    /// Plan new days
    Generate {
        #[arg(long, default_value_t = 1)]
        days: usize,
    },
    /// Plan every remaining day of the week ahead
    Fill,
    /// Mark a day (YYYY-MM-DD) as done and free its slot
    Complete { date: String },
    /// Show the recipe for one meal
    Meal {
        /// Day, as YYYY-MM-DD
        date: String,
        /// breakfast, lunch or dinner
        meal_type: MealType,
    },
    /// Set daily calorie and macro targets
    Goals {
        #[arg(long)]
        calories: u32,
        #[arg(long)]
        protein: u32,
        #[arg(long)]
        carbs: u32,
        #[arg(long)]
        fat: u32,
    },
    /// Replace allergies (comma separated)
    Allergies { values: String },
    /// Replace dietary restrictions (comma separated)
    Restrictions { values: String },
    /// Replace disliked ingredients (comma separated)
    Dislikes { values: String },
    /// Replace preferred cuisines (comma separated)
    Cuisines { values: String },
}

pub async fn run(command: Commands, config: Config) -> anyhow::Result<()> {
    let planner = Planner::new(mealcal::connect(&config)?);

    let phase = planner.session().bootstrap().await;
    tracing::debug!(%phase, "session restored");

    match command {
        Commands::Register {
            email,
            first_name,
            last_name,
        } => session::register(&planner, email, first_name, last_name).await,
        Commands::Login { email } => session::login(&planner, &email).await,
        Commands::Logout => session::logout(&planner),
        Commands::Whoami => session::whoami(&planner),
        Commands::Password => session::password(&planner).await,
        Commands::Plans => plan::plans(&planner).await,
        Commands::Today => plan::today(&planner).await,
        Commands::Generate { days } => plan::generate(&planner, days).await,
        Commands::Fill => plan::fill(&planner).await,
        Commands::Complete { date } => plan::complete(&planner, &date).await,
        Commands::Meal { date, meal_type } => plan::meal(&planner, &date, meal_type).await,
        Commands::Goals {
            calories,
            protein,
            carbs,
            fat,
        } => profile::goals(&planner, calories, protein, carbs, fat).await,
        Commands::Allergies { values } => {
            profile::list(&planner, profile::ListKind::Allergies, &values).await
        }
        Commands::Restrictions { values } => {
            profile::list(&planner, profile::ListKind::Restrictions, &values).await
        }
        Commands::Dislikes { values } => {
            profile::list(&planner, profile::ListKind::Dislikes, &values).await
        }
        Commands::Cuisines { values } => {
            profile::list(&planner, profile::ListKind::Cuisines, &values).await
        }
    }
}

fn require_login(planner: &Planner<HttpApi>) -> anyhow::Result<()> {
    if planner.session().is_authenticated() {
        return Ok(());
    }

    anyhow::bail!("Not signed in. Run `mealcal login --email <email>` first.")
}

/// Reads a password without echoing it.
fn prompt_secret(prompt: &str) -> anyhow::Result<String> {
    Ok(Password::new().with_prompt(prompt).interact()?)
}

/// Reads a new password twice without echoing it.
fn prompt_new_secret(prompt: &str) -> anyhow::Result<String> {
    Ok(Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?)
}
