use std::io;

use chrono::Local;
use clap::{Parser, Subcommand};
use student_survey::{
    AppError, Config, DeleteOutcome, Field, FieldValue, FormController, ListController,
    Navigator, Route, SubmitOutcome, Survey, SurveyApi, SurveyClient,
};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "survey")]
#[command(about = "Manage student surveys stored in the survey backend", long_about = None)]
#[command(after_help = "Fields use their JSON names, e.g. firstName=Ada zip=22030 likedSports=true")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Show every stored survey
    List,
    /// Print one survey as JSON
    Show { id: i64 },
    /// Submit a new survey
    Create {
        #[arg(value_name = "FIELD=VALUE")]
        edits: Vec<String>,
    },
    /// Change fields of a stored survey
    Edit {
        id: i64,
        #[arg(value_name = "FIELD=VALUE")]
        edits: Vec<String>,
    },
    /// Delete one survey
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete every survey
    Purge {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli.command).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), AppError> {
    let config = Config::load()?;
    let client = SurveyClient::new(&config)?;
    debug!(endpoint = %client.endpoint(), "using survey backend");

    match command {
        Commands::List => list(client).await,
        Commands::Show { id } => show(client, id).await,
        Commands::Create { edits } => create(client, &config, &edits).await,
        Commands::Edit { id, edits } => edit(client, &config, id, &edits).await,
        Commands::Delete { id, yes } => delete(client, Some(id), yes).await,
        Commands::Purge { yes } => delete(client, None, yes).await,
    }
}

async fn list(client: SurveyClient) -> Result<(), AppError> {
    let nav = Navigator::new(Route::SurveyList);
    let mut surveys = ListController::new(client, &nav);
    surveys.load().await;

    if let Some(notice) = surveys.notice() {
        return Err(AppError::Notice(notice.clone()));
    }

    let rows = surveys.rows();
    if rows.is_empty() {
        println!("No surveys yet.");
        return Ok(());
    }

    println!(
        "{:>5}  {:<24} {:<28} {:<11} {:<12} {:<12} Liked",
        "ID", "Name", "Email", "Date", "Interest", "Recommend"
    );
    for row in rows {
        let id = row.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into());
        println!(
            "{:>5}  {:<24} {:<28} {:<11} {:<12} {:<12} {}",
            id,
            row.name,
            row.email,
            row.date_of_survey,
            row.interest_source,
            row.recommendation,
            row.liked_items
        );
    }
    Ok(())
}

async fn show(client: SurveyClient, id: i64) -> Result<(), AppError> {
    let survey = client.get_by_id(id).await?;
    println!("{}", serde_json::to_string_pretty(&survey)?);
    Ok(())
}

async fn create(client: SurveyClient, config: &Config, edits: &[String]) -> Result<(), AppError> {
    let nav = Navigator::new(Route::NewSurvey);
    let mut form = FormController::new(client, &nav, config);

    // The date picker starts on today.
    form.set_field(Field::DateOfSurvey, Local::now().date_naive().to_string())?;
    apply_edits(&mut form, edits)?;

    let record = saved(form.submit().await)?;
    let id = record.id.map(|id| id.to_string()).unwrap_or_default();
    println!("Survey submitted successfully (id {id}).");
    Ok(())
}

async fn edit(
    client: SurveyClient,
    config: &Config,
    id: i64,
    edits: &[String],
) -> Result<(), AppError> {
    let nav = Navigator::new(Route::EditSurvey(id));
    let mut form = FormController::open(client, &nav, config).await;

    if let Some(notice) = form.notice() {
        return Err(AppError::Notice(notice.clone()));
    }
    apply_edits(&mut form, edits)?;

    saved(form.submit().await)?;
    println!("Survey {id} updated successfully.");
    Ok(())
}

async fn delete(client: SurveyClient, id: Option<i64>, yes: bool) -> Result<(), AppError> {
    let nav = Navigator::new(Route::SurveyList);
    let mut surveys = ListController::new(client, &nav);
    let confirm = confirmer(yes);

    let outcome = match id {
        Some(id) => surveys.delete(Some(id), &confirm).await,
        None => surveys.delete_all(&confirm).await,
    };

    match outcome {
        DeleteOutcome::Deleted => {
            println!("Deleted. {} surveys remain.", surveys.surveys().len());
            Ok(())
        }
        DeleteOutcome::Declined | DeleteOutcome::Skipped => {
            println!("Nothing deleted.");
            Ok(())
        }
        DeleteOutcome::Failed(notice) => Err(AppError::Notice(notice)),
        DeleteOutcome::Stale => Err(AppError::Stale),
    }
}

/// The stored record, or why the submit did not go through. The form's mode
/// decides between `Created` and `Updated`.
fn saved(outcome: SubmitOutcome) -> Result<Survey, AppError> {
    match outcome {
        SubmitOutcome::Created(saved) | SubmitOutcome::Updated(saved) => Ok(saved),
        SubmitOutcome::Invalid(errors) => Err(AppError::Validation(errors)),
        SubmitOutcome::Failed(notice) => Err(AppError::Notice(notice)),
        SubmitOutcome::Stale => Err(AppError::Stale),
    }
}

fn apply_edits<A: SurveyApi>(
    form: &mut FormController<A>,
    edits: &[String],
) -> Result<(), AppError> {
    for edit in edits {
        let (name, raw) = edit
            .split_once('=')
            .ok_or_else(|| AppError::Usage(format!("expected field=value, got {edit:?}")))?;
        let field: Field = name.parse()?;

        let value = if field.is_flag() {
            FieldValue::Flag(parse_flag(raw)?)
        } else {
            FieldValue::Text(raw.to_string())
        };
        form.set_field(field, value)?;
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Result<bool, AppError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Ok(true),
        "false" | "no" | "n" | "0" | "off" | "" => Ok(false),
        other => Err(AppError::Usage(format!("expected true/false, got {other:?}"))),
    }
}

/// `--yes` answers every prompt; otherwise ask on the terminal.
fn confirmer(yes: bool) -> impl Fn(&str) -> bool {
    move |message: &str| yes || ask(message)
}

fn ask(message: &str) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or_else(|e| {
            warn!(error = %e, "confirmation prompt failed, treating as no");
            false
        })
}
