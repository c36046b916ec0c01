//! Command-line admin for the site's contact messages

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use site_core::{
    chat::ChatSession, default_export_file_name, messages_to_csv, Action, AppConfig, ContactSubmission,
    Dashboard, DashboardStats, FileStorage, GeminiClient, Language, LoginOutcome, MemoryStorage,
    Message, NavEvent, Outcome, Page, ServiceCatalog, SiteStore, StatusFilter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "site-admin", version, about = "Manage contact messages stored by the website")]
struct Cli {
    /// JSON file holding the local storage entries
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Admin password, required by the dashboard commands
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List messages, newest first
    List {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        status: FilterArg,
        #[arg(long)]
        search: Option<String>,
    },
    /// Print one message and mark it as read
    Show { id: String },
    MarkRead { id: String },
    Delete { id: String },
    /// Write all messages as CSV
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Stats,
    /// Store a contact-form submission
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// List the company's services
    Services {
        #[arg(long, default_value = "fr")]
        lang: Language,
    },
    /// Ask the chat assistant a question
    Chat {
        #[arg(long, default_value = "fr")]
        lang: Language,
        question: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    New,
    Read,
}

impl From<FilterArg> for StatusFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => StatusFilter::All,
            FilterArg::New => StatusFilter::New,
            FilterArg::Read => StatusFilter::Read,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = AppConfig::load()
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    if let Some(path) = cli.storage.clone() {
        config.storage.local_path = path;
    }

    info!("Using storage file: {}", config.storage.local_path.display());

    let local = Arc::new(FileStorage::new(config.storage.local_path.clone()));
    let session = Arc::new(MemoryStorage::new());
    let mut store = SiteStore::new(&config, local, session);

    match cli.command {
        Command::Submit { name, phone, email, subject, message } => {
            let submission = ContactSubmission::new(name, phone, email, subject, message);
            match store.dispatch(Action::SubmitContact(submission)) {
                Ok(Outcome::Created(message)) => println!("Stored message {}", message.id),
                Ok(_) => {}
                Err(e) => match e.validation_result() {
                    Some(result) => {
                        for (field, errors) in &result.errors {
                            eprintln!("{}: {}", field, errors.join(", "));
                        }
                        bail!("Submission rejected");
                    }
                    None => return Err(e.into()),
                },
            }
        }
        Command::Services { lang } => {
            let catalog = ServiceCatalog::load()?;
            for (id, text) in catalog.services(lang) {
                println!("{:<20} {}\n{:<20} {}\n", id, text.title, "", text.description);
            }
        }
        Command::Chat { lang, question } => {
            if !config.chat_enabled() {
                warn!("No chat API key configured (SITE_CHAT__API_KEY); the assistant will answer with its fallback text");
            }
            let backend = Arc::new(GeminiClient::new(config.chat.clone()));
            let mut session = ChatSession::new(backend, lang);
            match session.ask(&question.join(" ")).await {
                Some(reply) => println!("{}", reply),
                None => bail!("Nothing to ask"),
            }
        }
        admin_command => {
            login(&mut store, cli.password.as_deref())?;
            run_admin(&mut store, &config, admin_command)?;
        }
    }

    Ok(())
}

fn login(store: &mut SiteStore, password: Option<&str>) -> Result<()> {
    store.dispatch(Action::Navigate(NavEvent::NavigateTo(Page::Admin)))?;
    let password = password.ok_or_else(|| anyhow!("--password is required for this command"))?;
    match store.dispatch(Action::AdminLogin(password.to_string()))? {
        Outcome::Login(LoginOutcome::Granted) => Ok(()),
        _ => bail!("Incorrect admin password"),
    }
}

fn run_admin(store: &mut SiteStore, config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::List { status, search } => {
            let mut dashboard = Dashboard::new(config.dashboard.toast_duration_ms);
            dashboard.filter = status.into();
            dashboard.search = search.unwrap_or_default();
            for message in dashboard.visible(store.messages()) {
                print_summary(message);
            }
        }
        Command::Show { id } => {
            let message = store
                .messages()
                .iter()
                .find(|m| m.id == id)
                .cloned()
                .ok_or_else(|| anyhow!("No message with id {}", id))?;
            store.dispatch(Action::MarkRead(id))?;
            print_summary(&message);
            println!("  phone: {}\n  email: {}\n\n{}", message.phone, message.email, message.message);
        }
        Command::MarkRead { id } => {
            if let Outcome::Changed(false) = store.dispatch(Action::MarkRead(id.clone()))? {
                println!("Message {} was already read or does not exist", id);
            }
        }
        Command::Delete { id } => {
            if let Outcome::Changed(removed) = store.dispatch(Action::DeleteMessage(id.clone()))? {
                println!("{}", if removed { "Deleted" } else { "Nothing to delete" });
            }
        }
        Command::Export { output } => {
            let csv = messages_to_csv(store.messages())?;
            let path = output.unwrap_or_else(|| PathBuf::from(default_export_file_name()));
            std::fs::write(&path, csv)?;
            println!("Exported {} messages to {}", store.messages().len(), path.display());
        }
        Command::Stats => {
            let stats = DashboardStats::from_messages(store.messages());
            println!("total: {}  unread: {}  read: {}", stats.total, stats.unread, stats.read);
        }
        Command::Submit { .. } | Command::Services { .. } | Command::Chat { .. } => {}
    }
    Ok(())
}

fn print_summary(message: &Message) {
    let marker = if message.is_new() { "*" } else { " " };
    println!(
        "{} {}  {}  {} <{}>  {}",
        marker, message.id, message.date, message.name, message.email, message.subject
    );
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) { "debug" } else { "warn" };
            format!("site_core={},site_admin={}", default_level, default_level).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }
}
