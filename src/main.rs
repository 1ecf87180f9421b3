mod commands;

use clap::{Parser, Subcommand};
use polyglot_core::{
    config::{self, GeneralConfig},
    locale::Locale,
};
use polyglot_i18n::{env_language_hint, DirTableSource, FilePreferenceStore, LocaleResolver};
use polyglot_providers::{JokeClient, TranslationCache};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "polyglot",
    version,
    about = "Locale resolution and runtime translation for the landing page"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the active locale, or change it.
    Locale {
        #[command(subcommand)]
        action: Option<LocaleAction>,
    },
    /// Look up a dotted key in the active translation table.
    T {
        /// Dotted key, e.g. `pricing.pro.features`.
        key: String,
        /// Text to show when the key is missing.
        #[arg(long)]
        fallback: Option<String>,
    },
    /// Translate free text through the cached translation API.
    Translate {
        /// Target locale (default: active locale).
        #[arg(long)]
        to: Option<String>,
        /// Source locale.
        #[arg(long, default_value = "en")]
        from: String,
        /// The text to translate.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
    /// Fetch a random joke and show it in the active locale.
    Joke,
    /// Check configuration and which translation tables load.
    Status,
}

#[derive(Subcommand)]
enum LocaleAction {
    /// Persist and switch to a new locale.
    Set {
        /// One of fr, en, es, ja, zh.
        code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = init_logging(&cfg.polyglot);

    let source = Arc::new(DirTableSource::new(config::shellexpand(
        &cfg.i18n.locales_dir,
    )));
    let prefs = FilePreferenceStore::new(config::shellexpand(&cfg.i18n.preference_file));
    let resolver = LocaleResolver::new(source.clone(), Arc::new(prefs));
    resolver.init(env_language_hint().as_deref());

    match cli.command {
        Commands::Status => {
            print!("{}", commands::status_report(&cli.config, &cfg, &source));
        }
        Commands::Locale { action: None } => {
            print!("{}", commands::locale_listing(&resolver));
        }
        Commands::Locale {
            action: Some(LocaleAction::Set { code }),
        } => {
            let snapshot = resolver.change_locale_code(&code)?;
            println!("{} {}", snapshot.locale.flag(), snapshot.locale.label());
        }
        Commands::T { key, fallback } => {
            for line in commands::lookup_lines(&resolver, &key, fallback.as_deref()) {
                println!("{line}");
            }
        }
        Commands::Translate { to, from, text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: polyglot translate [--to <code>] <text>");
            }
            let to = to.map(|c| c.parse::<Locale>()).transpose()?;
            let from: Locale = from.parse()?;
            let cache = TranslationCache::from_config(&cfg.translation)?;
            let out =
                commands::translate_text(&resolver, &cache, &text.join(" "), to, from).await;
            println!("{out}");
        }
        Commands::Joke => {
            let snapshot = resolver.snapshot();
            let client = JokeClient::from_config(&cfg.jokes)?;
            match client.fetch_random_joke().await {
                Ok(joke) => {
                    let cache = TranslationCache::from_config(&cfg.translation)?;
                    let view = commands::present_joke(&snapshot, &cache, &joke).await;
                    println!("{view}");
                }
                Err(e) => {
                    tracing::warn!("joke: {e}");
                    println!("{}", commands::joke_error(&snapshot));
                }
            }
        }
    }

    Ok(())
}

/// Log to stderr and, when the log directory is writable, to a daily file.
fn init_logging(cfg: &GeneralConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));
    let stderr = fmt::layer().with_writer(std::io::stderr);
    let log_dir = PathBuf::from(config::shellexpand(&cfg.data_dir)).join("logs");

    match std::fs::create_dir_all(&log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(&log_dir, "polyglot.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        Err(_) => {
            tracing_subscriber::registry().with(filter).with(stderr).init();
            None
        }
    }
}
