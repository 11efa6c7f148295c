use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use review_kernel::activity::{ActivityLog, Timestamper};
use review_kernel::config::ReviewConfig;
use review_kernel::console::{self, ConsoleCommand, HELP};
use review_kernel::navigation::RecordingNavigator;
use review_kernel::scheduler::{ManualScheduler, TokioScheduler};
use review_kernel::session::ReviewSession;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Command::new("review-kernel")
        .version(review_kernel::VERSION)
        .about("Document review kernel: task state machine and activity log")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("warn")
                .help("Tracing filter, overridden by RUST_LOG"),
        )
        .arg(
            Arg::new("wall-clock")
                .long("wall-clock")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Stamp new activity entries with local time"),
        )
        .subcommand(Command::new("console").about("Interactive review session on stdin"))
        .subcommand(
            Command::new("walkthrough")
                .about("Run a scripted review on a simulated clock")
                .arg(
                    Arg::new("path")
                        .long("path")
                        .default_value("correction")
                        .value_parser(["correction", "override"])
                        .help("Which decision to take"),
                )
                .arg(
                    Arg::new("justification")
                        .long("justification")
                        .default_value("Employee confirmed legal name change")
                        .help("Override justification"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("seed")
                .about("Print the initial activity log")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        );

    let matches = cli.get_matches();
    let log_level = matches
        .get_one::<String>("log-level")
        .map_or("warn", String::as_str);
    init_tracing(log_level)?;
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("console", _)) => run_console(&config).await,
        Some(("walkthrough", args)) => run_walkthrough(&config, args),
        Some(("seed", args)) => {
            let log = ActivityLog::seeded();
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(log.entries())?);
            } else {
                print!("{}", console::render_log(&log));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")
}

fn load_config(matches: &ArgMatches) -> Result<ReviewConfig> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => ReviewConfig::load(path).with_context(|| format!("load config {path}"))?,
        None => ReviewConfig::default(),
    };
    if matches.get_flag("wall-clock") {
        return Ok(config.with_timestamper(Timestamper::Wall));
    }
    Ok(config)
}

async fn run_console(config: &ReviewConfig) -> Result<()> {
    let (scheduler, mut fired) = TokioScheduler::new();
    let mut session = ReviewSession::new(config, scheduler, Box::new(RecordingNavigator::new()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    print!("{}", console::render(&session.snapshot()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    break;
                };
                let command = match line.parse::<ConsoleCommand>() {
                    Ok(command) => command,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                match command {
                    ConsoleCommand::Quit => break,
                    ConsoleCommand::Help => println!("{HELP}"),
                    ConsoleCommand::Case => print!("{}", console::render_case(session.case())),
                    other => {
                        if let Some(reason) = console::apply(&mut session, &other).rejection() {
                            println!("ignored: {reason}");
                        }
                        print!("{}", console::render(&session.snapshot()));
                    }
                }
            }
            Some(timer) = fired.recv() => {
                let before = session.snapshot();
                session.on_timer(timer);
                let after = session.snapshot();
                if before != after {
                    print!("{}", console::render(&after));
                }
            }
        }
    }
    Ok(())
}

fn run_walkthrough(config: &ReviewConfig, args: &ArgMatches) -> Result<()> {
    let clock = Arc::new(ManualScheduler::new());
    let mut session = ReviewSession::new(config, clock.clone(), Box::new(RecordingNavigator::new()));

    session.open_review();
    match args.get_one::<String>("path").map(String::as_str) {
        Some("override") => {
            let justification = args
                .get_one::<String>("justification")
                .map_or("", String::as_str);
            session.open_override_modal();
            session.set_justification(justification);
            if let Some(reason) = session.confirm_override().rejection() {
                return Err(anyhow!("override rejected: {reason}"));
            }
        }
        _ => {
            session.request_correction();
        }
    }
    clock.advance(config.transition_delay(), |timer| session.on_timer(timer));

    let snapshot = session.snapshot();
    if args.get_flag("json") {
        println!("{}", console::render_json(&snapshot)?);
    } else {
        print!("{}", console::render(&snapshot));
    }
    Ok(())
}
