//! ChainNet CLI - Inspect, annotate and submit lemmas from the terminal

use anyhow::{Context, Result};
use chainnet_core::application::{AnnotationService, AnnotationSession, CommandOutcome, LemmaCommand};
use chainnet_core::domain::{FeatureLabel, Lemma};
use chainnet_core::error::AppError;
use chainnet_core::port::SystemTimeProvider;
use chainnet_infra_json::{
    load_queues, load_resource_bundle, JsonAnnotationStore, JsonFeatureStore, DEFAULT_FEATURES_FILE,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_STORE_DIR: &str = "~/.chainnet";
const DEFAULT_QUEUE: &str = "default";
const DEFINITION_WIDTH: usize = 60;

#[derive(Parser)]
#[command(name = "chainnet")]
#[command(about = "ChainNet lemma annotation CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the lexical resource JSON files
    #[arg(long, env = "CHAINNET_RESOURCE_DIR", default_value = ".")]
    resource_dir: PathBuf,

    /// Directory submissions and feature counts are written to
    #[arg(long, env = "CHAINNET_STORE_DIR", default_value = DEFAULT_STORE_DIR)]
    store_dir: String,

    /// Annotator id
    #[arg(long, env = "CHAINNET_USER", default_value = "anonymous")]
    user: String,

    /// Queue id
    #[arg(long, env = "CHAINNET_QUEUE", default_value = DEFAULT_QUEUE)]
    queue: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the senses of a lemma and its outstanding issues
    Show {
        /// Lemma key (e.g. bank:noun)
        lemma: String,
    },

    /// Replay a JSON command script against a lemma
    Annotate {
        /// Lemma key (e.g. bank:noun)
        lemma: String,

        /// JSON file holding an array of commands
        #[arg(short, long)]
        script: PathBuf,

        /// Submit the result when it is complete
        #[arg(long)]
        submit: bool,
    },

    /// Show the next lemma of the queue still to annotate
    Next,

    /// List feature suggestions, most frequent first
    Suggest {
        /// Number of suggestions to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Tabled)]
struct SenseRow {
    id: String,
    backend: String,
    label: String,
    known: String,
    connected_to: String,
    features: String,
    definition: String,
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", cut)
}

fn sense_rows(lemma: &mut Lemma) -> Result<Vec<SenseRow>> {
    let mut rows = Vec::new();
    for sense_id in lemma.order().to_vec() {
        let features = lemma.features(&sense_id)?;
        let resembles = lemma.resembles(&sense_id)?;
        let labels = lemma.feature_labels(&sense_id)?;
        let Some(sense) = lemma.get_sense(&sense_id) else {
            continue;
        };

        let mut feature_cells: Vec<String> = features
            .iter()
            .map(|(id, text)| format!("{}: {}", id, text))
            .collect();
        for (feature_id, label) in &labels {
            let mark = label.as_ref().map(FeatureLabel::as_str).unwrap_or("?");
            feature_cells.push(format!("<{}> {}", feature_id, mark));
        }

        rows.push(SenseRow {
            id: sense.get_outward_facing_id(lemma.word()),
            backend: sense.get_backend_sense_id(),
            label: sense
                .kind()
                .map(|kind| kind.display_name().to_string())
                .unwrap_or_else(|| "-".to_string()),
            known: if sense.is_known() { "yes" } else { "no" }.to_string(),
            connected_to: resembles.unwrap_or_default(),
            features: feature_cells.join("\n"),
            definition: truncate(&sense.definition().plain_text(), DEFINITION_WIDTH),
        });
    }
    Ok(rows)
}

fn print_session(session: &mut AnnotationSession) -> Result<()> {
    let key = session.lemma_key();
    println!("{}", key.cyan().bold());
    println!();
    let rows = sense_rows(session.lemma_mut())?;
    println!("{}", Table::new(rows));
    println!();

    let issues = session.lemma_mut().issues();
    if issues.is_failed() {
        println!("{}", format!("{} issue(s):", issues.len()).yellow().bold());
        for issue in issues.iter() {
            println!("  {} {}", "•".yellow(), issue);
        }
    } else {
        println!("{}", "✓ Annotation complete".green().bold());
    }
    Ok(())
}

fn init_logging() {
    let log_format = std::env::var("CHAINNET_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chainnet=info"));

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let store_dir = PathBuf::from(shellexpand::tilde(&cli.store_dir).into_owned());
    info!(
        resource_dir = %cli.resource_dir.display(),
        store_dir = %store_dir.display(),
        user = %cli.user,
        queue = %cli.queue,
        "ChainNet CLI v{}",
        chainnet_core::VERSION
    );

    let bundle = load_resource_bundle(&cli.resource_dir)
        .await
        .context("Failed to load lexical resource")?;
    let service = AnnotationService::new(
        Arc::new(bundle),
        Arc::new(JsonAnnotationStore::new(store_dir.clone())),
        Arc::new(JsonFeatureStore::new(
            store_dir,
            Some(cli.resource_dir.join(DEFAULT_FEATURES_FILE)),
        )),
        Arc::new(SystemTimeProvider),
    );

    match cli.command {
        Commands::Show { lemma } => {
            let mut session = service.open(&lemma)?;
            print_session(&mut session)?;
        }

        Commands::Annotate {
            lemma,
            script,
            submit,
        } => {
            let raw = tokio::fs::read_to_string(&script)
                .await
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let commands: Vec<LemmaCommand> =
                serde_json::from_str(&raw).context("Invalid command script")?;

            let mut session = service.open(&lemma)?;
            for (index, command) in commands.into_iter().enumerate() {
                match session.apply(command) {
                    Ok(CommandOutcome::Done) => {}
                    Ok(outcome) => println!("  {} #{} {:?}", "•".bold(), index + 1, outcome),
                    Err(e) => println!("  {} #{} {}", "✗".red(), index + 1, e),
                }
            }
            println!();
            print_session(&mut session)?;

            if submit {
                println!();
                match service.submit(&mut session, &cli.user, &cli.queue).await {
                    Ok(_) => println!("{}", format!("✓ {} submitted", lemma).green().bold()),
                    Err(AppError::IncompleteAnnotation(_)) => {
                        println!("{}", "Cannot submit: annotation incomplete".red().bold())
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        Commands::Next => {
            let queues = load_queues(&cli.resource_dir).await?;
            let Some(queue) = queues.get(&cli.queue) else {
                anyhow::bail!("Invalid queue ID: {}", cli.queue);
            };
            match service.next_lemma(&cli.user, &cli.queue, queue).await? {
                Some(lemma) => {
                    let done = queue.iter().position(|key| *key == lemma).unwrap_or(0);
                    println!("{} ({}/{})", lemma.cyan().bold(), done + 1, queue.len());
                }
                None => println!("{}", "Thank you for participating.".green()),
            }
        }

        Commands::Suggest { limit } => {
            let frequencies = service.feature_frequencies(&cli.user).await?;
            let suggestions = frequencies.suggestions();
            if suggestions.is_empty() {
                println!("{}", "No feature suggestions yet".yellow());
            }
            for feature in suggestions.into_iter().take(limit) {
                let count = frequencies.get(&feature).unwrap_or(0);
                println!("  {:>4}  {}", count, feature);
            }
        }
    }

    Ok(())
}
