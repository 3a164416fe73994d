mod commands;
mod helper;
mod logging;
mod render;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;

use regimen_application::{
    ChatOutcome, ConversationController, PickerSession, RoutineOutcome, SessionHandle,
    load_catalog,
};
use regimen_core::generation::GenerationClient;
use regimen_core::projection::View;
use regimen_core::selection::{MemorySelectionStore, SelectionChange, SelectionStore};
use regimen_infrastructure::{ConfigService, FileCatalogSource, JsonSelectionStore, RegimenPaths};
use regimen_interaction::WorkerApiClient;

use crate::commands::{Command, HELP_TEXT};
use crate::helper::CliHelper;
use crate::render::Renderer;

/// How often background requests get their progress drawn.
const REPAINT_INTERVAL: Duration = Duration::from_millis(150);

#[derive(Parser)]
#[command(name = "regimen")]
#[command(about = "Pick products and generate a personalized routine", long_about = None)]
struct Cli {
    /// Use this directory instead of the platform config directory
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Product catalog JSON (overrides config and environment)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Keep the selection in memory only
    #[arg(long)]
    ephemeral: bool,
}

/// Serializes drawing between the REPL thread and the repaint task.
#[derive(Clone)]
struct Screen {
    session: SessionHandle,
    renderer: Arc<Mutex<Renderer>>,
}

impl Screen {
    fn new(session: SessionHandle) -> Self {
        Self {
            session,
            renderer: Arc::new(Mutex::new(Renderer::default())),
        }
    }

    /// Draws every invalidated view plus `forced` ones.
    fn repaint(&self, forced: &[View]) {
        let mut renderer = self
            .renderer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let lines = self.session.with(|session| {
            let mut views = session.take_invalidated();
            views.extend_from_slice(forced);
            views.sort();
            views.dedup();
            renderer.draw(session, &views)
        });
        for line in lines {
            println!("{line}");
        }
    }
}

fn notice(message: &str) {
    println!("{}", message.bright_black());
}

fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

/// The main entry point for the Regimen REPL.
///
/// Bootstraps paths, config, logging, the catalog and the selection store,
/// then runs a rustyline loop. Generation and chat requests run on spawned
/// tasks; a repaint task draws whatever they invalidate.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ===== Bootstrap =====
    let paths = RegimenPaths::new(cli.config_dir);
    let _log_guard = logging::init_logging(&paths.logs_dir()?)?;

    let mut config = ConfigService::new(paths.clone()).load()?;
    if let Some(catalog_path) = cli.catalog {
        config.catalog_path = catalog_path;
    }
    tracing::info!(
        endpoint = %config.endpoint_url,
        catalog = %config.catalog_path.display(),
        ephemeral = cli.ephemeral,
        "Starting regimen"
    );

    let catalog = load_catalog(&FileCatalogSource::new(config.catalog_path.clone())).await;
    let store: Arc<dyn SelectionStore> = if cli.ephemeral {
        Arc::new(MemorySelectionStore::new())
    } else {
        Arc::new(JsonSelectionStore::new(paths.selection_file()?))
    };
    let session = SessionHandle::new(PickerSession::new(catalog, store, &config));

    let client: Arc<dyn GenerationClient> = Arc::new(WorkerApiClient::from_config(&config));
    let controller = ConversationController::new(session.clone(), client);
    let screen = Screen::new(session.clone());

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Regimen ===".bright_magenta().bold());
    notice("Type /help for commands, or 'quit' to exit.");
    println!();
    screen.repaint(&[]);

    let repainter = {
        let screen = screen.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(REPAINT_INTERVAL);
            loop {
                ticker.tick().await;
                screen.repaint(&[]);
            }
        })
    };

    // ===== Main REPL Loop =====
    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        match commands::parse(trimmed) {
            Command::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Command::Help => println!("{HELP_TEXT}"),
            Command::Invalid(message) => println!("{}", message.yellow()),
            Command::Search(query) => session.with(|s| s.set_search_query(query)),
            Command::Category(category) => {
                if category.is_empty() {
                    let categories = session.with(|s| s.catalog().categories().join(", "));
                    notice(&format!("Categories: {categories}"));
                }
                session.with(|s| s.set_category(category));
            }
            Command::More => session.with(|s| s.show_more()),
            Command::Products => screen.repaint(&[View::Grid]),
            Command::Selected => screen.repaint(&[View::SelectionList]),
            Command::Toggle(id) => match session.with(|s| s.toggle_selection(id)) {
                Some(SelectionChange::Added) => notice(&format!("Selected #{id}.")),
                Some(SelectionChange::Removed) => notice(&format!("Deselected #{id}.")),
                None => println!("{}", format!("No product with id {id}.").yellow()),
            },
            Command::Details(id) => {
                let known = session.with(|s| {
                    let known = s.catalog().contains(id);
                    if known {
                        s.toggle_expanded(id);
                    }
                    known
                });
                if !known {
                    println!("{}", format!("No product with id {id}.").yellow());
                }
            }
            Command::Remove(id) => {
                if !session.with(|s| s.remove_selection(id)) {
                    println!("{}", format!("Product {id} is not selected.").yellow());
                }
            }
            Command::Clear => {
                let answer = rl.readline("Clear all selected products? (y/n) ");
                if matches!(answer.as_deref().map(str::trim), Ok("y" | "Y" | "yes")) {
                    session.with(|s| s.clear_selection());
                } else {
                    notice("Selection kept.");
                }
            }
            Command::Copy => match session.with(|s| s.copy_routine().map(str::to_string)) {
                None => println!("{}", "No generated routine available to copy.".yellow()),
                Some(text) => match copy_to_clipboard(&text) {
                    Ok(()) => println!("{}", "Routine copied to clipboard.".bright_green()),
                    Err(err) => {
                        tracing::warn!(error = %err, "Clipboard unavailable");
                        println!(
                            "{}",
                            "Could not access the clipboard. Select the routine above and copy it manually."
                                .yellow()
                        );
                    }
                },
            },
            Command::Generate => {
                let controller = controller.clone();
                tokio::spawn(async move {
                    if controller.generate_routine().await == RoutineOutcome::AlreadyInFlight {
                        notice("A routine is already being generated.");
                    }
                });
            }
            Command::Chat(text) => {
                let controller = controller.clone();
                tokio::spawn(async move {
                    if let ChatOutcome::Failed(err) = controller.submit_chat(&text).await {
                        tracing::debug!(kind = err.kind(), "Chat turn answered with apology");
                    }
                });
            }
        }

        screen.repaint(&[]);
    }

    repainter.abort();
    Ok(())
}
