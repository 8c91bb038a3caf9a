use crate::api::ApiClient;
use crate::authoring::{require_teacher, submit_draft, update_draft, Draft, ExerciseKind};
use crate::config::AppConfig;
use crate::placement::{QuestionBank, QuestionKind};
use crate::session_context::SessionStore;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Terminal client for the Lingo English-learning service.
#[derive(Parser, Debug)]
#[command(name = "lingo-client", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the backend API (overrides config and LINGO_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Placement question bank to use instead of the built-in one
    #[arg(long, global = true)]
    pub question_bank: Option<PathBuf>,

    /// Path to a config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, update or delete lesson content (teacher accounts)
    Author {
        #[command(subcommand)]
        action: AuthorCommands,
    },
    /// Inspect placement question banks
    Bank {
        #[command(subcommand)]
        action: BankCommands,
    },
    /// Forget the stored sign-in
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum AuthorCommands {
    /// Check a draft file without sending it
    Validate { file: PathBuf },
    /// Validate a draft and add it to a lesson
    Submit {
        file: PathBuf,
        #[arg(long)]
        lesson: u64,
    },
    /// Validate a draft and replace an existing item
    Update {
        file: PathBuf,
        #[arg(long)]
        id: u64,
    },
    /// Delete an item
    Delete {
        #[arg(value_enum)]
        target: ItemKind,
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum BankCommands {
    /// Validate a question bank (the built-in one when no path is given)
    Check { path: Option<PathBuf> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItemKind {
    MultipleChoice,
    SentenceRewriting,
    Cloze,
    ListeningDictation,
    Ordering,
    Vocabulary,
}

impl ItemKind {
    pub fn exercise_kind(&self) -> Option<ExerciseKind> {
        match self {
            ItemKind::MultipleChoice => Some(ExerciseKind::MultipleChoice),
            ItemKind::SentenceRewriting => Some(ExerciseKind::SentenceRewriting),
            ItemKind::Cloze => Some(ExerciseKind::Cloze),
            ItemKind::ListeningDictation => Some(ExerciseKind::ListeningDictation),
            ItemKind::Ordering => Some(ExerciseKind::Ordering),
            ItemKind::Vocabulary => None,
        }
    }
}

/// Loads a draft and fails with every validation message when it is invalid.
pub fn load_valid_draft(path: &Path) -> anyhow::Result<Draft> {
    let draft = Draft::from_path(path)
        .with_context(|| format!("Failed to read draft {}", path.display()))?;
    let errors = draft.validate();
    if !errors.is_empty() {
        let lines: Vec<String> = errors.iter().map(|e| format!("  - {}", e)).collect();
        bail!("Invalid {}:\n{}", draft.label(), lines.join("\n"));
    }
    Ok(draft)
}

pub fn bank_report(path: Option<&Path>) -> anyhow::Result<String> {
    let bank = match path {
        Some(path) => QuestionBank::from_path(path)
            .with_context(|| format!("Invalid question bank {}", path.display()))?,
        None => QuestionBank::builtin().context("Built-in question bank is invalid")?,
    };
    let blanks = bank
        .questions()
        .iter()
        .filter(|q| q.kind() == QuestionKind::FillInTheBlank)
        .count();
    let reorders = bank.len() - blanks;
    Ok(format!(
        "{} questions: {} fill-in-the-blank, {} sentence reorder",
        bank.len(),
        blanks,
        reorders
    ))
}

pub async fn run_author(
    action: AuthorCommands,
    config: &AppConfig,
    store: &SessionStore,
) -> anyhow::Result<()> {
    if let AuthorCommands::Validate { file } = &action {
        let draft = load_valid_draft(file)?;
        println!("{} is a valid {}", file.display(), draft.label());
        return Ok(());
    }

    let session = store.load().context("Failed to read stored session")?;
    let teacher = require_teacher(session.as_ref())?;
    let client = ApiClient::new(&config.api_base_url)?;
    log::info!("Authoring as {} against {}", teacher.email, client.base_url());

    match action {
        AuthorCommands::Validate { .. } => {}
        AuthorCommands::Submit { file, lesson } => {
            let draft = load_valid_draft(&file)?;
            let created = submit_draft(&client, &draft, lesson).await?;
            println!("Created {} in lesson {}", draft.label(), lesson);
            log::debug!("Create response: {}", created);
        }
        AuthorCommands::Update { file, id } => {
            let draft = load_valid_draft(&file)?;
            let updated = update_draft(&client, &draft, id).await?;
            println!("Updated {} {}", draft.label(), id);
            log::debug!("Update response: {}", updated);
        }
        AuthorCommands::Delete { target, id } => {
            match target.exercise_kind() {
                Some(kind) => client.delete_exercise(kind, id).await?,
                None => client.delete_vocabulary(id).await?,
            }
            println!("Deleted {:?} {}", target, id);
        }
    }
    Ok(())
}

pub fn run_logout(store: &SessionStore) -> anyhow::Result<()> {
    let had_session = store.load().ok().flatten().is_some();
    store
        .clear()
        .with_context(|| format!("Failed to remove {}", store.path().display()))?;
    if had_session {
        println!("Signed out");
    } else {
        println!("No stored session");
    }
    Ok(())
}
