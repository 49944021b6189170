//! Command-line front end.
//!
//! Each command reads from or forwards an intent to the
//! [`CharacterViewModel`]; nothing here talks to the repository directly.

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use morty_core::quiz::{AnswerOutcome, QuizSession};
use morty_core::types::{created_now, DbId};
use morty_core::versus::{Selection, VersusPicker};
use morty_db::models::character::{Character, CreateCharacter};
use morty_remote::RemoteCharacter;

use crate::error::{AppError, AppResult};
use crate::view_model::{CharacterViewModel, RemoteState};

/// How long a command waits for its mutation to show up in the local slot.
const CONFIRM_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(name = "morty", version, about = "Browse characters and keep a local collection")]
pub struct Cli {
    /// Print machine-readable JSON instead of text where supported.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List characters from the API.
    List,
    /// Show saved characters.
    Saved,
    /// Save a new character.
    Add(AddArgs),
    /// Delete a saved character by id, with a chance to undo.
    Delete { id: DbId },
    /// Delete every saved character.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Print the saved characters every time they change (Ctrl-C to stop).
    Watch,
    /// Play the quiz.
    Quiz,
    /// Compare two characters from the API list by position (1-based).
    Versus { first: usize, second: usize },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub species: String,
    #[arg(long)]
    pub gender: String,
    #[arg(long)]
    pub status: String,
    #[arg(long = "type")]
    pub kind: String,
    /// Image file to store with the character.
    #[arg(long)]
    pub image: PathBuf,
}

/// Execute `cli.command`, writing results to `out` and reading answers
/// (quiz, delete undo prompt) from `input`.
pub async fn run<W, R>(cli: &Cli, vm: &CharacterViewModel, out: &mut W, input: &mut R) -> AppResult<()>
where
    W: Write,
    R: BufRead,
{
    match &cli.command {
        Command::List => list(vm, cli.json, out).await,
        Command::Saved => saved(vm, cli.json, out).await,
        Command::Add(args) => add(vm, args, out).await,
        Command::Delete { id } => delete(vm, *id, out, input).await,
        Command::Clear { yes } => clear(vm, *yes, out).await,
        Command::Watch => watch(vm, out).await,
        Command::Quiz => {
            let mut session = QuizSession::standard();
            play_quiz(&mut session, input, out)
        }
        Command::Versus { first, second } => versus(vm, *first, *second, out).await,
    }
}

// ---------------------------------------------------------------------------
// Remote list
// ---------------------------------------------------------------------------

async fn loaded_characters(vm: &CharacterViewModel) -> AppResult<Vec<RemoteCharacter>> {
    match vm.settled_remote().await {
        RemoteState::Success(page) => Ok(page.results),
        RemoteState::Error(message) => Err(AppError::Unavailable(message)),
        RemoteState::Initial | RemoteState::Loading => {
            Err(AppError::Unavailable("Character list is still loading".to_string()))
        }
    }
}

async fn list<W: Write>(vm: &CharacterViewModel, json: bool, out: &mut W) -> AppResult<()> {
    let characters = loaded_characters(vm).await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&characters).map_err(io_error)?)?;
        return Ok(());
    }
    if characters.is_empty() {
        writeln!(out, "No characters available.")?;
        return Ok(());
    }
    for (i, c) in characters.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {} | {} | {} | {}",
            i + 1,
            c.name,
            c.status,
            c.species,
            c.gender
        )?;
        writeln!(out, "     Origin: {} | Location: {}", c.origin.name, c.location.name)?;
    }
    Ok(())
}

async fn versus<W: Write>(vm: &CharacterViewModel, first: usize, second: usize, out: &mut W) -> AppResult<()> {
    let characters = loaded_characters(vm).await?;

    let mut picker = VersusPicker::new();
    for position in [first, second] {
        let index = position
            .checked_sub(1)
            .ok_or_else(|| AppError::BadRequest("Positions start at 1".to_string()))?;
        if picker.select(index) == Selection::AlreadySelected {
            return Err(AppError::BadRequest("Pick two different characters".to_string()));
        }
    }
    let (left, right) = picker.pair(&characters).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Only {} characters are available",
            characters.len()
        ))
    })?;

    let rows: [(&str, &str, &str); 7] = [
        ("Name", left.name.as_str(), right.name.as_str()),
        ("Status", left.status.as_str(), right.status.as_str()),
        ("Species", left.species.as_str(), right.species.as_str()),
        ("Gender", left.gender.as_str(), right.gender.as_str()),
        ("Type", left.kind.as_str(), right.kind.as_str()),
        ("Origin", left.origin.name.as_str(), right.origin.name.as_str()),
        ("Location", left.location.name.as_str(), right.location.name.as_str()),
    ];
    let width = rows.iter().map(|(_, l, _)| l.len()).max().unwrap_or(0).max(4);
    writeln!(out, "{:<9} {:<width$}    {}", "", "VS", "")?;
    for (label, l, r) in rows {
        writeln!(out, "{label:<9} {l:<width$}    {r}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Local collection
// ---------------------------------------------------------------------------

async fn loaded_local(vm: &CharacterViewModel) -> Vec<Character> {
    vm.wait_for_local(|_| true).await
}

async fn confirm_local<F>(vm: &CharacterViewModel, predicate: F) -> AppResult<Vec<Character>>
where
    F: FnMut(&[Character]) -> bool,
{
    tokio::time::timeout(CONFIRM_TIMEOUT, vm.wait_for_local(predicate))
        .await
        .map_err(|_| AppError::BadRequest("The change was not saved; see log output".to_string()))
}

fn write_saved<W: Write>(rows: &[Character], out: &mut W) -> AppResult<()> {
    if rows.is_empty() {
        writeln!(out, "No saved characters.")?;
        return Ok(());
    }
    for c in rows {
        writeln!(
            out,
            "#{} {} | {} | {} | {} | {} | created {} | image {} bytes",
            c.id,
            c.name,
            c.status,
            c.species,
            c.gender,
            c.kind,
            c.created,
            c.image.len()
        )?;
    }
    Ok(())
}

async fn saved<W: Write>(vm: &CharacterViewModel, json: bool, out: &mut W) -> AppResult<()> {
    let rows = loaded_local(vm).await;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows).map_err(io_error)?)?;
        return Ok(());
    }
    write_saved(&rows, out)
}

async fn add<W: Write>(vm: &CharacterViewModel, args: &AddArgs, out: &mut W) -> AppResult<()> {
    let image = tokio::fs::read(&args.image).await?;
    let input = CreateCharacter {
        name: args.name.trim().to_string(),
        species: args.species.trim().to_string(),
        gender: args.gender.trim().to_string(),
        status: args.status.trim().to_string(),
        kind: args.kind.trim().to_string(),
        created: created_now(),
        image,
    };
    input.validate()?;

    let known: HashSet<DbId> = loaded_local(vm).await.iter().map(|c| c.id).collect();
    let name = input.name.clone();
    vm.insert_character(input).await?;

    let rows = confirm_local(vm, |rows| rows.iter().any(|c| !known.contains(&c.id) && c.name == name)).await?;
    if let Some(saved) = rows.iter().rev().find(|c| !known.contains(&c.id)) {
        writeln!(out, "Character inserted (#{})", saved.id)?;
    }
    Ok(())
}

/// Delete `id`, then offer to put the row back under the same id.
async fn delete<W, R>(vm: &CharacterViewModel, id: DbId, out: &mut W, input: &mut R) -> AppResult<()>
where
    W: Write,
    R: BufRead,
{
    let existing = loaded_local(vm).await.into_iter().find(|c| c.id == id);

    // Absent ids still go through the store, which treats them as a no-op.
    vm.delete_character(id).await?;
    let Some(row) = existing else {
        writeln!(out, "No character #{id}")?;
        return Ok(());
    };
    confirm_local(vm, |rows| rows.iter().all(|c| c.id != id)).await?;

    write!(out, "Character #{id} deleted. Undo? [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(out)?;
        return Ok(());
    }
    if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        return Ok(());
    }

    vm.upsert_character(row).await?;
    confirm_local(vm, |rows| rows.iter().any(|c| c.id == id)).await?;
    writeln!(out, "Character #{id} restored")?;
    Ok(())
}

async fn clear<W: Write>(vm: &CharacterViewModel, yes: bool, out: &mut W) -> AppResult<()> {
    if !yes {
        return Err(AppError::BadRequest(
            "Refusing to delete all saved characters without --yes".to_string(),
        ));
    }

    vm.delete_all_characters().await?;
    confirm_local(vm, |rows| rows.is_empty()).await?;
    writeln!(out, "All saved characters deleted")?;
    Ok(())
}

async fn watch<W: Write>(vm: &CharacterViewModel, out: &mut W) -> AppResult<()> {
    let first = loaded_local(vm).await;
    write_saved(&first, out)?;
    out.flush()?;

    let mut rx = vm.local_characters();
    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let rows = rx.borrow_and_update().clone();
                writeln!(out, "---")?;
                write_saved(&rows, out)?;
                out.flush()?;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Watch interrupted");
                return Ok(());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

/// Play `session` interactively. Answers are an option number (1-3) or
/// the option text. End of input abandons the quiz.
pub fn play_quiz<R, W>(session: &mut QuizSession, input: &mut R, out: &mut W) -> AppResult<()>
where
    R: BufRead,
    W: Write,
{
    while let Some(question) = session.current() {
        writeln!(
            out,
            "Question {}/{}  Score: {}/{}",
            session.question_number(),
            session.total(),
            session.score(),
            session.total()
        )?;
        writeln!(out, "{}", question.question)?;
        for (i, option) in question.options.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, option)?;
        }

        let choice = loop {
            write!(out, "> ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                writeln!(out, "Quiz abandoned. Score: {}/{}", session.score(), session.total())?;
                return Ok(());
            }
            match parse_choice(line.trim(), &question.options) {
                Some(option) => break option,
                None => writeln!(out, "Pick 1, 2 or 3")?,
            }
        };

        match session.answer(choice) {
            AnswerOutcome::Correct => writeln!(out, "Correct!")?,
            AnswerOutcome::Wrong { correct_answer } => {
                writeln!(out, "Wrong! The answer was {correct_answer}.")?
            }
            AnswerOutcome::Ignored => {}
        }
        writeln!(out)?;
        session.advance();
    }

    if let Some(summary) = session.summary() {
        writeln!(out, "{}", summary.title)?;
        writeln!(out, "{}", summary.message)?;
    }
    Ok(())
}

fn parse_choice(raw: &str, options: &[&'static str]) -> Option<&'static str> {
    if let Ok(n) = raw.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    options
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(raw))
}

fn io_error(e: serde_json::Error) -> AppError {
    AppError::Io(e.into())
}
