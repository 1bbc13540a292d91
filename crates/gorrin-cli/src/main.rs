//! gorrin command-line front end.
//!
//! ## Usage
//!
//! ```bash
//! # Apply the enabled persisted rules to a file (stdin when omitted)
//! gorrin apply notes.txt
//!
//! # One-off replacement on top of the persisted rules
//! gorrin apply notes.txt --find 'colou?r' --replace color
//!
//! # Without a backend, only the ad-hoc rule applies
//! gorrin --offline apply notes.txt --find cat --replace dog
//!
//! # Inspect the persisted rules
//! gorrin rules list
//!
//! # Where would a search term highlight?
//! gorrin highlight 'c.t' notes.txt
//! ```
//!
//! The backend base URL comes from `--url`, then the `GORRIN_RULES_URL`
//! environment variable, then `http://localhost:8080`.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use gorrin_engine::{Document, QuickRule, decorate, rewrite};
use gorrin_rules::{HttpRuleBackend, RuleBackend, RuleStore, base_url_from_env};

#[derive(Parser, Debug)]
#[command(name = "gorrin")]
#[command(about = "Batch search-and-replace over block documents")]
struct Cli {
    /// Rules backend base URL (default: $GORRIN_RULES_URL, then http://localhost:8080)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Skip the rules backend entirely
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply the enabled persisted rules (plus an optional ad-hoc rule) to a document
    Apply {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,

        /// Ad-hoc pattern, applied after all persisted rules
        #[arg(long, requires = "replace")]
        find: Option<String>,

        /// Replacement text for --find
        #[arg(long, requires = "find")]
        replace: Option<String>,
    },

    /// Inspect the persisted rules
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// Print the spans the live highlighter would decorate
    Highlight {
        /// Search term (regex — metacharacters are live)
        term: String,

        /// Input file; stdin when omitted
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// List the persisted rules in application order
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let base_url = cli.url.clone().unwrap_or_else(base_url_from_env);

    match cli.command {
        Command::Apply {
            file,
            find,
            replace,
        } => apply(&base_url, cli.offline, file.as_deref(), find, replace).await,
        Command::Rules {
            command: RulesCommand::List,
        } => list_rules(&base_url).await,
        Command::Highlight { term, file } => highlight(&term, file.as_deref()),
    }
}

async fn apply(
    base_url: &str,
    offline: bool,
    file: Option<&Path>,
    find: Option<String>,
    replace: Option<String>,
) -> Result<()> {
    let text = read_input(file)?;
    let document = Document::from_plain_text(&text);

    let mut store = RuleStore::new();
    if !offline {
        let backend = HttpRuleBackend::new(base_url)?;
        store.load(&backend).await;
    }

    let ad_hoc = match (find, replace) {
        (Some(pattern), Some(replacement)) => Some(QuickRule {
            pattern,
            replacement,
        }),
        _ => None,
    };

    let rewritten = rewrite(&document, store.rules(), ad_hoc.as_ref());
    println!("{}", rewritten.full_text());
    Ok(())
}

async fn list_rules(base_url: &str) -> Result<()> {
    let backend = HttpRuleBackend::new(base_url)?;
    let records = backend.fetch_rules().await.context("fetching rules")?;

    if records.is_empty() {
        println!("no rules");
        return Ok(());
    }
    for record in &records {
        let marker = if record.enabled { "x" } else { " " };
        println!(
            "[{marker}] {:>4}  {:?} -> {:?}",
            record.id.as_u64(),
            record.pattern,
            record.replacement
        );
    }
    Ok(())
}

fn highlight(term: &str, file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    let document = Document::from_plain_text(&text);
    let decorator = decorate(term);

    for (line, block) in document.blocks().iter().enumerate() {
        for span in decorator.block_spans(block) {
            println!(
                "{}:{}..{}\t{}",
                line + 1,
                span.start,
                span.end,
                &block.text[span.start..span.end]
            );
        }
    }
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}
