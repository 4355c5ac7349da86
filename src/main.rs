use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};

use tukosawa::{
    Catalog, DiscState, FeedOptions, HeadlessMedia, HeroView, Intent, LogObserver, ReqwestClient,
    Session, SessionOptions, SharedObserver, StateChange, StateObserver, TransportView,
    community_posts, load_episodes, parse_episode_title,
};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static DISC: Emoji<'_, '_> = Emoji("💿 ", "(o) ");
static PAUSED: Emoji<'_, '_> = Emoji("⏸️  ", "[=] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static END: Emoji<'_, '_> = Emoji("🏁 ", "[.] ");
static PIN: Emoji<'_, '_> = Emoji("📌 ", "* ");

/// Browse and play the Tuko Sawa podcast from the terminal
#[derive(Parser, Debug)]
#[command(name = "tukosawa")]
#[command(about = "Browse and play the Tuko Sawa podcast from the terminal")]
#[command(version)]
struct Args {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - suppress banners and status output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List episodes in display order
    Episodes {
        /// RSS feed URL or path to local RSS file (defaults to the built-in catalog)
        #[arg(short, long)]
        feed: Option<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the community board
    Board,

    /// Start an interactive playback session reading commands from stdin
    Play {
        /// RSS feed URL or path to local RSS file (defaults to the built-in catalog)
        #[arg(short, long)]
        feed: Option<String>,

        /// Length in seconds of every simulated audio source
        #[arg(long)]
        length: Option<f64>,

        /// Initial volume between 0 and 1
        #[arg(long, default_value = "1.0")]
        volume: f64,

        /// Start muted
        #[arg(long)]
        muted: bool,

        /// Refuse every play request, as a host without audio would
        #[arg(long)]
        block_autoplay: bool,
    },
}

/// A line typed into the interactive session
#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Do(Intent),
    Flip(String),
    Tick(f64),
    Cards,
    Status,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        let number = |name: &str| -> Result<f64, String> {
            arg.ok_or_else(|| format!("'{}' needs a number", name))?
                .parse::<f64>()
                .map_err(|_| format!("'{}' needs a number", name))
        };
        let id = |name: &str| -> Result<String, String> {
            arg.map(String::from)
                .ok_or_else(|| format!("'{}' needs an episode id", name))
        };

        match verb.as_str() {
            "select" | "s" => Ok(Self::Do(Intent::Select(id("select")?))),
            "toggle" | "t" | "play" | "pause" => Ok(Self::Do(Intent::TogglePlayPause)),
            "next" | "n" => Ok(Self::Do(Intent::Next)),
            "seek" => Ok(Self::Do(Intent::Seek(number("seek")?))),
            "mute" => Ok(Self::Do(Intent::SetMuted(true))),
            "unmute" => Ok(Self::Do(Intent::SetMuted(false))),
            "volume" | "vol" => Ok(Self::Do(Intent::SetVolume(number("volume")?))),
            "flip" => Ok(Self::Flip(id("flip")?)),
            "tick" => Ok(Self::Tick(number("tick")?)),
            "cards" | "ls" => Ok(Self::Cards),
            "status" | "" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command '{}', try 'help'", other)),
        }
    }
}

/// Prints the state changes a listener would notice
struct ConsoleObserver;

impl StateObserver for ConsoleObserver {
    fn notify(&self, change: StateChange) {
        match change {
            StateChange::EpisodeChanged { title, .. } => {
                println!("{DISC}Now spinning {}", title.bold().yellow());
            }
            StateChange::PlaybackFailed { episode_id, reason } => {
                println!(
                    "{FAILURE}{} {} - {}",
                    "Could not start episode".red(),
                    episode_id.yellow(),
                    reason.dimmed()
                );
            }
            StateChange::PlaybackEnded { episode_id } => {
                println!("{END}Episode {} finished", episode_id.cyan());
            }
            _ => log::debug!("{:?}", change),
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Load the catalog from a feed, falling back to the built-in episodes
async fn load_catalog(feed: Option<&str>, quiet: bool) -> Catalog {
    let Some(source) = feed else {
        return Catalog::builtin();
    };

    let spinner = (!quiet).then(|| {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(format!("{SEARCH}Fetching feed: {}", source.cyan()));
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bar
    });

    let client = ReqwestClient::new();
    let episodes = load_episodes(&client, source, &FeedOptions::default()).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    match Catalog::new(episodes) {
        Ok(catalog) => catalog,
        Err(e) => {
            if !quiet {
                println!(
                    "{FAILURE}{} ({}), using the built-in episodes",
                    "Feed unusable".red(),
                    e.to_string().dimmed()
                );
            }
            Catalog::builtin()
        }
    }
}

fn print_episodes(catalog: &Catalog) {
    for episode in catalog.episodes() {
        let parsed = parse_episode_title(&episode.title);
        let label = catalog.volume_label(&episode.id).unwrap_or_default();
        let title = [parsed.prefix, parsed.first_half, parsed.second_half]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" / ");

        println!(
            "{} {} {} {}",
            label.dimmed(),
            format!("[{}]", episode.id).cyan(),
            title.bold(),
            episode.duration.yellow()
        );
        if !episode.publish_date.is_empty() {
            println!("    {}", episode.publish_date.dimmed());
        }
    }
}

fn print_board() {
    for post in community_posts() {
        println!(
            "{PIN}{} {}",
            post.kind.label().on_green().black(),
            post.author.bold()
        );
        println!("   \"{}\"\n", post.content);
    }
}

fn print_status(session: &Session<HeadlessMedia>) {
    let hero = HeroView::from_coordinator(session.coordinator());
    let transport = TransportView::from_coordinator(session.coordinator());

    let disc = match hero.disc {
        DiscState::Spinning => &DISC,
        DiscState::Resting => &PAUSED,
    };
    let sound = if transport.muted {
        "muted".red().to_string()
    } else {
        format!("vol {:.0}%", transport.volume * 100.0)
    };

    println!(
        "{disc}{} {} {} {}",
        hero.volume_label.dimmed(),
        transport.now_spinning.bold(),
        transport.readout.yellow(),
        sound.dimmed()
    );
}

fn print_cards(session: &Session<HeadlessMedia>) {
    let coordinator = session.coordinator();
    let cards = session
        .carousel()
        .cards(coordinator.catalog(), &coordinator.current_episode().id);

    for card in cards {
        let marker = if card.is_current { ">" } else { " " };
        let sticker = card.episode.sticker().unwrap_or_default();
        println!(
            "{} {} {} {} {}",
            marker.green().bold(),
            card.volume_label.dimmed(),
            format!("[{}]", card.episode.id).cyan(),
            card.episode.title.bold(),
            sticker.on_yellow().black()
        );
        if card.is_flipped {
            println!("      {}", card.episode.description);
            println!("      {}", card.episode.tags.join(" · ").dimmed());
        }
    }
}

fn print_help() {
    println!(
        "{}",
        "select <id> | toggle | next | seek <secs> | mute | unmute | volume <0-1> \
         | tick <secs> | flip <id> | cards | status | quit"
            .dimmed()
    );
}

async fn run_session(
    catalog: Catalog,
    media: HeadlessMedia,
    options: SessionOptions,
    quiet: bool,
) -> Result<()> {
    let observer: SharedObserver = if quiet {
        LogObserver::shared()
    } else {
        Arc::new(ConsoleObserver)
    };

    let mut session = Session::new(catalog, media, &options, observer);
    session.pump();

    if !quiet {
        print_help();
        print_status(&session);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read command")? {
        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{FAILURE}{}", message.red());
                continue;
            }
        };

        match command {
            SessionCommand::Do(intent) => {
                if let Err(e) = session.dispatch(intent) {
                    println!("{FAILURE}{}", e.to_string().red());
                }
                session.pump();
            }
            SessionCommand::Flip(id) => match session.flip_card(&id) {
                Ok(_) => print_cards(&session),
                Err(e) => println!("{FAILURE}{}", e.to_string().red()),
            },
            SessionCommand::Tick(seconds) => session.tick(seconds),
            SessionCommand::Cards => print_cards(&session),
            SessionCommand::Status => {}
            SessionCommand::Help => print_help(),
            SessionCommand::Quit => break,
        }

        if !quiet {
            print_status(&session);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "Tuko Sawa".bold().magenta(),
            "- Raw. Honest. Chaotic.".dimmed()
        );
    }

    match args.command {
        Command::Episodes { feed, json } => {
            let catalog = load_catalog(feed.as_deref(), args.quiet || json).await;
            if json {
                let rendered = serde_json::to_string_pretty(catalog.episodes())
                    .context("Failed to serialize catalog")?;
                println!("{}", rendered);
            } else {
                print_episodes(&catalog);
            }
        }

        Command::Board => print_board(),

        Command::Play {
            feed,
            length,
            volume,
            muted,
            block_autoplay,
        } => {
            let catalog = load_catalog(feed.as_deref(), args.quiet).await;

            let mut media = HeadlessMedia::new().blocking_autoplay(block_autoplay);
            if let Some(seconds) = length {
                media = media.with_length(seconds);
            }

            let options = SessionOptions {
                initial_volume: volume,
                start_muted: muted,
            };

            run_session(catalog, media, options, args.quiet)
                .await
                .context("Playback session failed")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_intents() {
        assert_eq!(
            "select 3".parse::<SessionCommand>(),
            Ok(SessionCommand::Do(Intent::Select("3".to_string())))
        );
        assert_eq!(
            "SEEK 12.5".parse::<SessionCommand>(),
            Ok(SessionCommand::Do(Intent::Seek(12.5)))
        );
        assert_eq!(
            "mute".parse::<SessionCommand>(),
            Ok(SessionCommand::Do(Intent::SetMuted(true)))
        );
        assert_eq!(
            "t".parse::<SessionCommand>(),
            Ok(SessionCommand::Do(Intent::TogglePlayPause))
        );
    }

    #[test]
    fn parses_local_commands() {
        assert_eq!(
            "flip 2".parse::<SessionCommand>(),
            Ok(SessionCommand::Flip("2".to_string()))
        );
        assert_eq!("tick 5".parse::<SessionCommand>(), Ok(SessionCommand::Tick(5.0)));
        assert_eq!("".parse::<SessionCommand>(), Ok(SessionCommand::Status));
        assert_eq!("q".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
    }

    #[test]
    fn rejects_missing_arguments() {
        assert!("seek".parse::<SessionCommand>().is_err());
        assert!("seek soon".parse::<SessionCommand>().is_err());
        assert!("select".parse::<SessionCommand>().is_err());
        assert!("dance".parse::<SessionCommand>().is_err());
    }
}
