//! Command execution against a persisted board session

use crate::cli::{CardCommands, ColumnCommands, Commands, PromptKind, TaskCommands};
use crate::output::{print_yaml, BoardView, Created, ProjectSummary};
use anyhow::{bail, Context};
use chat2canvas_board::{
    prompts, BoardConfig, BoardError, BoardSession, BoardStore, CardDraft, CardId, CardUpdate,
    ColumnId, ColumnUpdate, FileKeyValueStore, PersistenceAdapter, ProjectId, Task,
};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Run one command, loading the snapshot first and flushing it afterwards
pub async fn run(command: Commands, config: &BoardConfig) -> anyhow::Result<()> {
    // These never touch stored boards
    match &command {
        Commands::Prompt {
            kind: PromptKind::Creator,
        } => {
            println!("{}", prompts::creator_prompt());
            return Ok(());
        }
        Commands::Prompt {
            kind: PromptKind::Reminder,
        } => {
            println!("{}", prompts::reminder_prompt());
            return Ok(());
        }
        _ => {}
    }

    let _lock = FileKeyValueStore::new(&config.storage_dir).lock()?;
    let mut session = BoardSession::open(PersistenceAdapter::from_config(config)).await;
    execute(&mut session, command, config)?;
    session.close().await?;
    Ok(())
}

fn execute(session: &mut BoardSession, command: Commands, config: &BoardConfig) -> anyhow::Result<()> {
    match command {
        Commands::Projects => print_yaml(&ProjectSummary::list(session.store())),
        Commands::New { name } => {
            let id = session.apply(|store| Ok(store.create_project(name.as_str())))?;
            print_yaml(&Created { id: id.to_string(), name })
        }
        Commands::Rename { id, name } => {
            let id = ProjectId::from_string(id);
            session.apply(|store| store.rename_project(&id, name.as_str()))?;
            print_yaml(&Created { id: id.to_string(), name })
        }
        Commands::Delete { id } => {
            let removed = session.apply(|store| store.delete_project(&ProjectId::from_string(id)))?;
            println!("Deleted project '{}' ({} cards)", removed.name, removed.card_count());
            Ok(())
        }
        Commands::Use { id } => {
            let id = ProjectId::from_string(id);
            session.apply(|store| {
                require_project(store, &id)?;
                store.set_active_project(id.clone());
                Ok(())
            })?;
            println!("Active project: {}", id);
            Ok(())
        }
        Commands::Show { project } => {
            let id = resolve_project(session.store(), project)?;
            let project = require_project(session.store(), &id)?;
            print_yaml(&BoardView::from(project))
        }
        Commands::Column { subcommand } => column_command(session, subcommand, config),
        Commands::Card { subcommand } => card_command(session, subcommand, config),
        Commands::Task {
            subcommand: TaskCommands::Toggle { card, index },
        } => {
            let project = resolve_project(session.store(), None)?;
            let card = CardId::from_string(card);
            let column = locate_card(session.store(), &project, &card)?;
            let done = session.apply(|store| store.toggle_task(&project, &column, &card, index))?;
            println!("Task {} is now {}", index, if done { "done" } else { "open" });
            Ok(())
        }
        Commands::Import { file } => {
            let text = read_input(file)?;
            let id = session.apply(|store| store.import_project(&text))?;
            let name = session
                .store()
                .project(&id)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            print_yaml(&Created { id: id.to_string(), name })
        }
        Commands::Export { project } => {
            let id = resolve_project(session.store(), project)?;
            println!("{}", session.store().export_project(&id)?);
            Ok(())
        }
        Commands::Prompt { kind } => {
            // Creator and reminder are answered before the session opens
            debug!(?kind, "rendering project prompt");
            let id = resolve_project(session.store(), None)?;
            let project = require_project(session.store(), &id)?;
            println!("{}", prompts::sync_message(project)?);
            Ok(())
        }
    }
}

fn column_command(
    session: &mut BoardSession,
    command: ColumnCommands,
    config: &BoardConfig,
) -> anyhow::Result<()> {
    let project = resolve_project(session.store(), None)?;
    match command {
        ColumnCommands::Add { title, color } => {
            let color = color.unwrap_or_else(|| config.default_column_color.clone());
            let id = session.apply(|store| store.create_column(&project, title.as_str(), color))?;
            print_yaml(&Created { id: id.to_string(), name: title })
        }
        ColumnCommands::Edit { id, title, color } => {
            let id = ColumnId::from_string(id);
            session.apply(|store| store.update_column(&project, &id, ColumnUpdate { title, color }))?;
            println!("Updated column {}", id);
            Ok(())
        }
        ColumnCommands::Delete { id } => {
            let removed =
                session.apply(|store| store.delete_column(&project, &ColumnId::from_string(id)))?;
            println!("Deleted column '{}' ({} cards)", removed.title, removed.cards.len());
            Ok(())
        }
        ColumnCommands::Move { from, to } => {
            session.apply(|store| store.reorder_columns(&project, from, to))?;
            println!("Moved column {} to {}", from, to);
            Ok(())
        }
    }
}

fn card_command(
    session: &mut BoardSession,
    command: CardCommands,
    config: &BoardConfig,
) -> anyhow::Result<()> {
    let project = resolve_project(session.store(), None)?;
    match command {
        CardCommands::Add {
            column,
            title,
            color,
            tasks,
        } => {
            let column = ColumnId::from_string(column);
            let color = color.unwrap_or_else(|| config.default_card_color.clone());
            let draft = CardDraft::new(title.as_str(), color)
                .with_tasks(tasks.into_iter().map(Task::new).collect());
            let id = session.apply(|store| store.create_card(&project, &column, draft))?;
            print_yaml(&Created { id: id.to_string(), name: title })
        }
        CardCommands::Edit { id, title, color } => {
            let id = CardId::from_string(id);
            let column = locate_card(session.store(), &project, &id)?;
            let update = CardUpdate {
                title,
                color,
                tasks: None,
            };
            session.apply(|store| store.update_card(&project, &column, &id, update))?;
            println!("Updated card {}", id);
            Ok(())
        }
        CardCommands::Delete { id } => {
            let id = CardId::from_string(id);
            let column = locate_card(session.store(), &project, &id)?;
            let removed = session.apply(|store| store.delete_card(&project, &column, &id))?;
            println!("Deleted card #{} '{}'", removed.number, removed.title);
            Ok(())
        }
        CardCommands::Move { id, to, index } => {
            let id = CardId::from_string(id);
            let from = locate_card(session.store(), &project, &id)?;
            let to = ColumnId::from_string(to);
            let landed = session.apply(|store| {
                store.move_card_between_columns(&project, &id, &from, &to, index)
            })?;
            println!("Moved card {} to column {} at position {}", id, to, landed);
            Ok(())
        }
    }
}

/// The explicitly requested project, or the active one
fn resolve_project(store: &BoardStore, requested: Option<String>) -> anyhow::Result<ProjectId> {
    if let Some(id) = requested {
        let id = ProjectId::from_string(id);
        require_project(store, &id)?;
        return Ok(id);
    }
    match store.active_project() {
        Some(project) => Ok(project.id.clone()),
        None => bail!("no active project; create one with `canvas new <name>` or import Canvas Code"),
    }
}

fn require_project<'a>(
    store: &'a BoardStore,
    id: &ProjectId,
) -> chat2canvas_board::Result<&'a chat2canvas_board::Project> {
    store
        .project(id)
        .ok_or_else(|| BoardError::ProjectNotFound { id: id.to_string() })
}

fn locate_card(store: &BoardStore, project: &ProjectId, card: &CardId) -> anyhow::Result<ColumnId> {
    store
        .find_card_column(project, card)
        .cloned()
        .ok_or_else(|| BoardError::CardNotFound { id: card.to_string() }.into())
}

fn read_input(file: Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            Ok(text)
        }
    }
}
