use std::{io::Write, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use court_pulse::{
    resolve_question,
    tracing::{init_tracing_subscriber, LogFormat},
    ChatModel, GeminiClient, NbaStatsClient, PromptTemplate, Roster, RosterOrigin,
    RosterPolicy, TranscriptAnalyzer, TranscriptAnalyzerBuilder, YouTubeTranscripts,
};
use court_roster::FileRosterStore;
use tokio::io::{AsyncBufReadExt, BufReader};

type Analyzer = TranscriptAnalyzer<FileRosterStore, NbaStatsClient, YouTubeTranscripts, GeminiClient>;

#[derive(Parser)]
#[command(
    name = "court-pulse",
    about = "Fantasy basketball insights from YouTube video transcripts"
)]
struct Cli {
    /// Google AI Studio API key, required by `ask` and `chat`
    #[arg(long, global = true, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model used to answer questions
    #[arg(long, global = true, env = "GEMINI_MODEL", default_value = GeminiClient::DEFAULT_MODEL)]
    model: String,

    /// Location of the player roster cache
    #[arg(long, global = true, env = "ROSTER_CACHE_PATH", default_value = FileRosterStore::DEFAULT_FILE_NAME)]
    cache_path: PathBuf,

    /// Hours before the cached roster is refreshed from stats.nba.com
    #[arg(long, global = true, env = "ROSTER_CACHE_TTL_HOURS", default_value = "24")]
    cache_ttl_hours: u64,

    /// Preferred transcript languages, most preferred first
    #[arg(
        long,
        global = true,
        env = "TRANSCRIPT_LANGUAGES",
        value_delimiter = ',',
        default_value = "en"
    )]
    languages: Vec<String>,

    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the active player roster, updating the cache when needed
    Players {
        /// Always fetch from stats.nba.com
        #[arg(long, conflicts_with = "offline")]
        refresh: bool,
        /// Only read the local cache
        #[arg(long)]
        offline: bool,
    },
    /// Print the cleaned transcript of a video
    Transcript {
        url: String,
        /// Skip player name correction
        #[arg(long)]
        no_correct: bool,
        /// Write the transcript to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the canned fantasy basketball prompts
    Prompts,
    /// Ask a single question about a video
    Ask {
        url: String,
        #[command(flatten)]
        question: QuestionArgs,
    },
    /// Start an interactive chat about a video
    Chat { url: String },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct QuestionArgs {
    /// Number of a canned prompt (see `prompts`)
    #[arg(long, short)]
    prompt: Option<usize>,
    /// Free-form question
    #[arg(long, short)]
    question: Option<String>,
}

impl QuestionArgs {
    fn resolve(&self) -> anyhow::Result<String> {
        let selected = self
            .prompt
            .map(|n| {
                PromptTemplate::from_number(n).with_context(|| {
                    format!("No prompt numbered {n}, pick 1-{}", PromptTemplate::ALL.len())
                })
            })
            .transpose()?;

        resolve_question(selected, self.question.as_deref().unwrap_or_default())
            .context("Please enter a question or select a prompt.")
    }
}

fn cache_ttl(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(60 * 60))
}

fn build_analyzer(cli: &Cli) -> anyhow::Result<Analyzer> {
    let api_key = cli.api_key.clone().unwrap_or_default();
    let transcripts = YouTubeTranscripts::new(cli.languages.clone())?;

    Ok(TranscriptAnalyzerBuilder::new()
        .store(FileRosterStore::new(&cli.cache_path))
        .directory(NbaStatsClient::new())
        .transcripts(transcripts)
        .model(GeminiClient::new(api_key).with_model(&cli.model))
        .cache_ttl(cache_ttl(cli.cache_ttl_hours))
        .build())
}

fn describe_origin(origin: RosterOrigin) -> String {
    let hours = |age: Duration| age.as_secs() / 3600;
    match origin {
        RosterOrigin::Fetched => "fetched from stats.nba.com".into(),
        RosterOrigin::Cache { age } => format!("from cache, {}h old", hours(age)),
        RosterOrigin::StaleCache { age } => {
            format!("from stale cache, {}h old (stats.nba.com unreachable)", hours(age))
        }
    }
}

fn print_prompts() {
    for template in PromptTemplate::ALL {
        println!("{:>2}. {template}", template.number());
    }
}

/// Name correction is best effort, a missing roster only degrades the transcript
async fn load_roster_for_correction(analyzer: &Analyzer) -> Option<Roster> {
    analyzer
        .load_roster(RosterPolicy::Cached)
        .await
        .inspect_err(|e| tracing::warn!(error = ?e, "Continuing without player roster"))
        .ok()
}

async fn run_players(analyzer: &Analyzer, policy: RosterPolicy) -> anyhow::Result<()> {
    let roster = analyzer.load_roster(policy).await?;

    println!(
        "{} active players ({})",
        roster.len(),
        describe_origin(roster.origin)
    );
    for player in &roster.players {
        println!("{}\t{}", player.full_name, player.team);
    }

    Ok(())
}

async fn run_transcript(
    analyzer: &Analyzer,
    url: &str,
    correct: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let transcript = if correct {
        let roster = load_roster_for_correction(analyzer).await;
        analyzer.prepare_transcript(url, roster.as_ref()).await?
    } else {
        analyzer.fetch_transcript(url).await?
    };
    let text = &transcript.text;

    match output {
        Some(path) => {
            tokio::fs::write(&path, text)
                .await
                .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
            tracing::info!(path = %path.display(), "Saved transcript");
        }
        None => println!("{text}"),
    }

    Ok(())
}

async fn run_chat(analyzer: &Analyzer, url: &str) -> anyhow::Result<()> {
    let roster = load_roster_for_correction(analyzer).await;
    let transcript = analyzer.prepare_transcript(url, roster.as_ref()).await?;
    let mut session = analyzer.start_session(&transcript);

    println!(
        "Transcript for {} loaded ({} words, {} player names matched). Chatting with {}.",
        transcript.video_id,
        transcript.text.split_whitespace().count(),
        transcript.corrected_words,
        analyzer.model().model_name()
    );
    println!("Type a question, /1-/6 for a canned prompt, /prompts to list them, /quit to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        let question = match line {
            "/quit" | "/exit" => break,
            "/prompts" => {
                print_prompts();
                continue;
            }
            _ => match line.strip_prefix('/') {
                Some(n) => {
                    let selected = n.parse().ok().and_then(PromptTemplate::from_number);
                    if selected.is_none() {
                        println!("Unknown command '{line}'");
                        continue;
                    }
                    resolve_question(selected, "")
                }
                None => resolve_question(None, line),
            },
        };

        let Some(question) = question else {
            println!("Please enter a question or select a prompt.");
            continue;
        };

        match session.ask(&question).await {
            Ok(answer) => println!("\n{answer}\n"),
            Err(e) => {
                tracing::error!(error = ?e, "Failed to answer question");
                println!("Error: {e:#}");
            }
        }
    }

    Ok(())
}

fn ensure_api_key(cli: &Cli) -> anyhow::Result<()> {
    match cli.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => Ok(()),
        _ => anyhow::bail!(
            "{} is not set. Pass --api-key or add it to your .env file",
            GeminiClient::API_KEY_ENV
        ),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber(cli.log_format)?;

    if let Command::Prompts = cli.command {
        print_prompts();
        return Ok(());
    }

    let analyzer = build_analyzer(&cli)?;

    match &cli.command {
        Command::Players { refresh, offline } => {
            let policy = match (refresh, offline) {
                (true, _) => RosterPolicy::Refresh,
                (_, true) => RosterPolicy::Offline,
                _ => RosterPolicy::Cached,
            };
            run_players(&analyzer, policy).await?;
        }
        Command::Transcript {
            url,
            no_correct,
            output,
        } => {
            run_transcript(&analyzer, url, !no_correct, output.clone()).await?;
        }
        Command::Ask { url, question } => {
            ensure_api_key(&cli)?;
            let question = question.resolve()?;
            let roster = load_roster_for_correction(&analyzer).await;

            let answer = analyzer.ask_once(url, roster.as_ref(), &question).await?;
            println!("{answer}");
        }
        Command::Chat { url } => {
            ensure_api_key(&cli)?;
            run_chat(&analyzer, url).await?;
        }
        Command::Prompts => {}
    }

    Ok(())
}
