//! REPL (Read-Eval-Print Loop) for interactive chat

use super::export::{save_conversation, timestamp};
use super::input::{MetaCommand, ReplInput};
use crate::config::ReplConfig;
use crate::interrupt::TurnInterrupt;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::TurnProgressReporter;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toolpilot_application::{
    AttachmentSource, ReasoningEngine, RunTurnInput, RunTurnUseCase, ToolExecutorPort,
};
use toolpilot_domain::conversation::{filter_candidates, render_listing};
use toolpilot_domain::{BaseDirectory, ConversationStore};
use tracing::{debug, info};

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    Exit,
    Continue,
}

/// Interactive chat REPL
pub struct ChatRepl<R, T, A>
where
    R: ReasoningEngine + 'static,
    T: ToolExecutorPort + 'static,
    A: AttachmentSource + 'static,
{
    use_case: RunTurnUseCase<R, T>,
    attachments: Arc<A>,
    base: BaseDirectory,
    store: ConversationStore,
    config: ReplConfig,
    engine_label: String,
}

impl<R, T, A> ChatRepl<R, T, A>
where
    R: ReasoningEngine + 'static,
    T: ToolExecutorPort + 'static,
    A: AttachmentSource + 'static,
{
    pub fn new(use_case: RunTurnUseCase<R, T>, attachments: Arc<A>, base: BaseDirectory) -> Self {
        Self {
            use_case,
            attachments,
            base,
            store: ConversationStore::new(),
            config: ReplConfig::default(),
            engine_label: String::new(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Shown in the welcome banner, e.g. `openai / gpt-4o`
    pub fn with_engine_label(mut self, label: impl Into<String>) -> Self {
        self.engine_label = label.into();
        self
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let rl_config = Config::builder()
            .max_history_size(self.config.history_size)?
            .auto_add_history(false)
            .build();
        let mut rl = DefaultEditor::with_config(rl_config)?;

        if let Some(ref path) = self.config.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        println!(
            "{}",
            ConsoleFormatter::welcome(&self.base.current(), &self.engine_label)
        );

        loop {
            match rl.readline("You> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(trimmed);
                    if let Some(ref path) = self.config.history_file
                        && let Err(e) = rl.save_history(path)
                    {
                        debug!("Failed to save history: {}", e);
                    }

                    match ReplInput::classify(trimmed) {
                        ReplInput::Empty => continue,
                        ReplInput::Command(command) => {
                            if self.handle_command(command) == CommandResult::Exit {
                                break;
                            }
                        }
                        ReplInput::Attach(query) => self.attach(&query).await,
                        ReplInput::Chat(text) => self.process_input(text).await,
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    if self.confirm_exit() {
                        break;
                    }
                }
                Err(err) => {
                    eprintln!("{}", ConsoleFormatter::error(&format!("{:?}", err)));
                    break;
                }
            }
        }

        println!("Bye!");
        Ok(())
    }

    fn confirm_exit(&self) -> bool {
        // No terminal to ask on means stdin is gone.
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Exit toolpilot?")
            .default(false)
            .interact()
            .unwrap_or(true)
    }

    /// Handle a meta-command. Returns whether the loop should exit.
    pub fn handle_command(&mut self, command: MetaCommand) -> CommandResult {
        match command {
            MetaCommand::Exit => return CommandResult::Exit,
            MetaCommand::Clear => {
                self.store.clear();
                info!("Conversation cleared");
                println!("{}", ConsoleFormatter::notice("Conversation cleared."));
            }
            MetaCommand::Save => match save_conversation(&self.store, &self.base, &timestamp()) {
                Ok(Some(path)) => println!("Saved to {}", path.display()),
                Ok(None) => println!("{}", ConsoleFormatter::notice("Nothing to save yet.")),
                Err(e) => eprintln!("{}", ConsoleFormatter::error(&e.to_string())),
            },
            MetaCommand::List => println!("{}", render_listing(self.store.turns())),
            MetaCommand::BaseDir(None) => {
                println!("Base directory: {}", self.base.current().display());
            }
            MetaCommand::BaseDir(Some(path)) => match self.base.reconfigure(&path) {
                Ok(new_base) => {
                    info!("Base directory changed to {}", new_base.display());
                    println!("Base directory: {}", new_base.display());
                }
                Err(e) => eprintln!("{}", ConsoleFormatter::error(&e.to_string())),
            },
            MetaCommand::Help | MetaCommand::Chat => println!("{}", ConsoleFormatter::help()),
        }
        CommandResult::Continue
    }

    /// Run one turn for `input`. Ctrl-C cancels it.
    pub async fn process_input(&mut self, input: String) {
        let cancel = CancellationToken::new();
        let _interrupt = TurnInterrupt::arm(cancel.clone());
        let progress = if self.config.show_progress {
            TurnProgressReporter::new()
        } else {
            TurnProgressReporter::quiet()
        };

        let result = self
            .use_case
            .execute_with_progress(RunTurnInput::new(input), &mut self.store, &cancel, &progress)
            .await;

        match result {
            Ok(output) => println!("{}", ConsoleFormatter::answer(&output.answer)),
            Err(e) => eprintln!("{}", ConsoleFormatter::turn_error(&e)),
        }
    }

    /// Pick a file matching `query`, ask for a question, and submit both as
    /// one chat input.
    async fn attach(&mut self, query: &str) {
        let files = match self.attachments.list_files() {
            Ok(files) => files,
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
                return;
            }
        };
        let candidates = filter_candidates(&files, query);
        if candidates.is_empty() {
            println!(
                "{}",
                ConsoleFormatter::notice(&format!("No files match '{}'.", query))
            );
            return;
        }

        let theme = ColorfulTheme::default();
        let selection = FuzzySelect::with_theme(&theme)
            .with_prompt("Attach file")
            .items(&candidates)
            .default(0)
            .interact_opt();
        let Ok(Some(index)) = selection else {
            println!("{}", ConsoleFormatter::notice("Attachment canceled."));
            return;
        };

        let attachment = match self.attachments.read(&candidates[index]).await {
            Ok(attachment) => attachment,
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
                return;
            }
        };
        if attachment.truncated {
            println!(
                "{}",
                ConsoleFormatter::notice(&format!("{} is large and was truncated.", attachment.name))
            );
        }

        let question: String = Input::with_theme(&theme)
            .with_prompt("Question")
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default();
        let question = question.trim();
        if question.is_empty() {
            println!("{}", ConsoleFormatter::notice("No question given, attachment aborted."));
            return;
        }

        self.process_input(attachment.compose_prompt(question)).await;
    }
}
