mod command;
mod render;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use strum::IntoEnumIterator;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

use lumina_core::catalog::{Catalog, Category, SIZES};
use lumina_core::error::{LuminaError, Result as LuminaResult};
use lumina_core::session::{GenerationRequest, TextGenerator};
use lumina_core::storefront::{Page, Storefront, StorefrontAction};
use lumina_infrastructure::{ConfigService, JsonFileKeyValueStore, LuminaPaths};
use lumina_interaction::GeminiApiAgent;

use command::{COMMANDS, Command};

/// How long the prompt waits for a reply before handing control back.
const REPLY_WAIT: Duration = Duration::from_secs(30);

/// LUMINA STYLE storefront in the terminal.
#[derive(Parser, Debug)]
#[command(name = "lumina", version, about)]
struct Args {
    /// Directory holding config.toml, secret.json and storage.json
    #[arg(long, env = "LUMINA_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Gemini model for the stylist (overrides config.toml and secret.json)
    #[arg(long)]
    model: Option<String>,
}

/// CLI helper for rustyline: completes commands and their arguments
/// (product names, categories, sizes, colors), highlights commands, and
/// hints the rest of the first match.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
    arguments: HashMap<&'static str, Vec<String>>,
}

impl CliHelper {
    fn new(catalog: &Catalog) -> Self {
        let product_names: Vec<String> =
            catalog.products().iter().map(|p| p.name.clone()).collect();
        let sizes: Vec<String> = SIZES.iter().map(|s| s.to_string()).collect();

        let arguments = HashMap::from([
            ("/view", product_names.clone()),
            ("/wish", product_names),
            (
                "/category",
                Category::iter().map(|c| c.label().to_string()).collect(),
            ),
            ("/size", sizes.clone()),
            ("/order", sizes),
            (
                "/color",
                catalog.all_colors().into_iter().map(str::to_string).collect(),
            ),
        ]);

        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            arguments,
        }
    }

    /// Where the word being completed starts, and its candidates.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        if !line.starts_with('/') {
            return (0, Vec::new());
        }

        let Some((command, arg)) = line.split_once(' ') else {
            let matches = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .cloned()
                .collect();
            return (0, matches);
        };

        let typed = arg.trim_start();
        let start = line.len() - typed.len();
        let typed_lower = typed.to_lowercase();
        let matches = self
            .arguments
            .get(command)
            .map(|options| {
                options
                    .iter()
                    .filter(|option| option.to_lowercase().starts_with(&typed_lower))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        (start, matches)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        // Only hint at the end of the line
        if pos < line.len() {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let typed = &line[start..];
        matches
            .into_iter()
            .find(|candidate| candidate.starts_with(typed) && candidate.len() > typed.len())
            .map(|candidate| candidate[typed.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Stand-in generator when no API key is configured. Every call fails, so
/// the session answers with its offline fallback.
struct UnconfiguredGenerator {
    reason: String,
}

#[async_trait::async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate(&self, _request: GenerationRequest) -> LuminaResult<String> {
        Err(LuminaError::config(self.reason.clone()))
    }
}

type PendingReply = JoinHandle<LuminaResult<String>>;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn build_storefront(args: &Args) -> Result<Storefront> {
    let paths = LuminaPaths::new(args.config_dir.as_deref())?;

    let mut config = ConfigService::new(paths.clone()).get_config();
    if let Some(model) = &args.model {
        config.assistant.model = Some(model.clone());
    }

    let generator: Arc<dyn TextGenerator> = match GeminiApiAgent::try_from_paths(&paths).await {
        Ok(agent) => Arc::new(agent),
        Err(e) => {
            tracing::warn!("Stylist is offline: {}", e);
            if let Err(e) = paths.ensure_secret_file() {
                tracing::warn!("Could not create secret template: {}", e);
            }
            Arc::new(UnconfiguredGenerator {
                reason: e.to_string(),
            })
        }
    };

    let store = Arc::new(JsonFileKeyValueStore::new(paths.storage_file()));
    Ok(Storefront::from_config(
        &config,
        Arc::new(Catalog::builtin()),
        store,
        generator,
    ))
}

/// Case-insensitive match against a fixed list, returning the canonical form.
fn canonical<'a>(value: &str, options: impl IntoIterator<Item = &'a str>) -> Option<String> {
    options
        .into_iter()
        .find(|option| option.eq_ignore_ascii_case(value.trim()))
        .map(str::to_string)
}

fn print_error(message: impl AsRef<str>) {
    println!("{}", message.as_ref().yellow());
}

/// Applies a command. Returns false when the REPL should exit.
fn run_command(storefront: &mut Storefront, command: Command) -> bool {
    match command {
        Command::Home => navigate(storefront, Page::Home),
        Command::Shop => navigate(storefront, Page::Shop),
        Command::Wishlist => navigate(storefront, Page::Wishlist),
        Command::About => navigate(storefront, Page::About),
        Command::View(target) => {
            if storefront.catalog().resolve(&target).is_none() {
                print_error(format!("No product called '{target}'."));
            } else {
                let action = if storefront.catalog().get(&target).is_some() {
                    StorefrontAction::ViewProduct(target)
                } else {
                    StorefrontAction::ViewProductByName(target)
                };
                storefront.dispatch(action);
                render::product(storefront);
            }
        }
        Command::Close => {
            storefront.dispatch(StorefrontAction::CloseProduct);
            render::page(storefront);
        }
        Command::Wish(target) => {
            let id = storefront
                .catalog()
                .resolve(&target)
                .map(|p| p.id.clone())
                .unwrap_or(target);
            if storefront.on_toggle_wishlist(&id) {
                let status = if storefront.is_wishlisted(&id) {
                    "Saved to your wishlist."
                } else {
                    "Removed from your wishlist."
                };
                println!("{}", status.bright_red());
            } else {
                print_error(format!("No product with id '{id}'."));
            }
        }
        Command::Category(label) => match Category::from_label(&label) {
            Some(category) => {
                storefront.dispatch(StorefrontAction::ToggleCategory(category));
                navigate(storefront, Page::Shop);
            }
            None => print_error(format!("Unknown category '{label}'. See /help.")),
        },
        Command::Size(size) => match canonical(&size, SIZES) {
            Some(size) => {
                storefront.dispatch(StorefrontAction::ToggleSize(size));
                navigate(storefront, Page::Shop);
            }
            None => print_error(format!("Sizes are {}.", SIZES.join(", "))),
        },
        Command::Color(color) => {
            let colors = storefront.catalog().all_colors();
            match canonical(&color, colors) {
                Some(color) => {
                    storefront.dispatch(StorefrontAction::ToggleColor(color));
                    navigate(storefront, Page::Shop);
                }
                None => print_error(format!("No product comes in '{color}'.")),
            }
        }
        Command::Clear => {
            storefront.dispatch(StorefrontAction::ClearFilters);
            navigate(storefront, Page::Shop);
        }
        Command::Recs => {
            if storefront.selected_product().is_some() {
                render::recommendations(storefront);
            } else {
                print_error("Open a product first with /view.");
            }
        }
        Command::Order { size, color } => {
            match storefront.order_inquiry(size.as_deref(), color.as_deref()) {
                Ok(inquiry) => {
                    let order = storefront.order_config();
                    println!("{}", "Send this message to place your order:".bold());
                    println!("{}", inquiry.message().bright_green());
                    match inquiry.whatsapp_url(&order.whatsapp_number) {
                        Ok(url) => println!("{} {}", "WhatsApp:".bold(), url.as_str().bright_cyan()),
                        Err(e) => print_error(e.to_string()),
                    }
                    println!("{} {}", "Order form:".bold(), order.form_url.bright_cyan());
                }
                Err(LuminaError::NotFound { entity_type, id }) => {
                    print_error(format!("Cannot order: no {entity_type} '{id}'."))
                }
                Err(e) => print_error(e.to_string()),
            }
        }
        Command::Help => render::help(),
        Command::Quit => return false,
        // Chat and history are async; handled by the loop
        Command::Chat(_) | Command::History => {}
    }
    true
}

fn navigate(storefront: &mut Storefront, page: Page) {
    storefront.dispatch(StorefrontAction::Navigate(page));
    render::page(storefront);
}

/// Prints a reply that arrived after the prompt stopped waiting.
async fn drain_pending(storefront: &Storefront, pending: &mut Option<PendingReply>) {
    let finished = pending.as_ref().is_some_and(|handle| handle.is_finished());
    if !finished {
        return;
    }
    if let Some(handle) = pending.take() {
        print_reply(storefront, handle.await);
    }
}

fn print_reply(
    storefront: &Storefront,
    outcome: std::result::Result<LuminaResult<String>, tokio::task::JoinError>,
) {
    match outcome {
        Ok(Ok(text)) => render::reply(&storefront.segment(&text)),
        Ok(Err(e)) => print_error(e.to_string()),
        Err(e) => eprintln!("{}", format!("Stylist task failed: {e}").red()),
    }
}

async fn chat(storefront: &Storefront, text: String, pending: &mut Option<PendingReply>) {
    let conversation = storefront.conversation();
    if conversation.is_in_flight() {
        print_error(LuminaError::Busy.to_string());
        return;
    }

    let wishlist = storefront.state().wishlist.clone();
    let mut handle: PendingReply =
        tokio::spawn(async move { conversation.send(&text, &wishlist).await });

    match timeout(REPLY_WAIT, &mut handle).await {
        Ok(outcome) => print_reply(storefront, outcome),
        Err(_) => {
            println!(
                "{}",
                "The stylist is still thinking; the reply will appear shortly.".bright_black()
            );
            *pending = Some(handle);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut storefront = build_storefront(&args).await?;

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(storefront.catalog())));

    println!(
        "{}",
        format!("=== {} ===", storefront.brand_name())
            .bright_magenta()
            .bold()
    );
    if let Some(greeting) = storefront.conversation().last_reply().await {
        render::reply(&storefront.segment(&greeting.content));
    }
    println!("{}", "Type /help for commands, or just ask for styling advice.".bright_black());
    println!();
    render::page(&storefront);

    let mut pending: Option<PendingReply> = None;

    // ===== Main REPL Loop =====
    loop {
        drain_pending(&storefront, &mut pending).await;

        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);
                drain_pending(&storefront, &mut pending).await;

                match command::parse(trimmed) {
                    Ok(Command::Chat(text)) => chat(&storefront, text, &mut pending).await,
                    Ok(Command::History) => {
                        let turns = storefront.conversation().turns().await;
                        render::history(&storefront, &turns);
                    }
                    Ok(command) => {
                        if !run_command(&mut storefront, command) {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                    }
                    Err(message) => print_error(message),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    if let Some(handle) = pending.take() {
        handle.abort();
    }

    Ok(())
}
