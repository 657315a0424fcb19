use clap::Parser;
use msh::{MshError, Outcome, Session, Value};
use msh_config::{LoggingConfig, MshConfig, ShellConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod completer;

/// msh - a minimal shell that threads its working directory through each command
#[derive(Parser, Debug)]
#[command(name = "msh", version, about)]
struct Args {
    /// Execute command lines separated by ';' and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Starting directory (default: the process working directory)
    #[arg(short, long)]
    dir: Option<String>,

    /// Path to configuration file
    #[arg(long = "config", env = "MSH_CONFIG")]
    config: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => msh_config::load_from_file(path).map_err(MshError::from)?,
        None => msh_config::load().unwrap_or_else(|e| {
            eprintln!("msh: warning: failed to load config: {e}, using defaults");
            MshConfig::default()
        }),
    };

    init_logging(&config.logging);

    let mut session = args
        .dir
        .map_or_else(Session::from_current_dir, Session::new);

    if let Some(command) = args.command {
        std::process::exit(run_commands(&mut session, &command));
    }

    run_repl(&mut session, &config.shell)?;
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.directive()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn print_value(value: &Value) {
    if value.is_empty() {
        return;
    }
    let out = value.to_string();
    if out.is_empty() {
        return;
    }
    if out.ends_with('\n') {
        print!("{out}");
    } else {
        println!("{out}");
    }
}

/// Run `;`-separated command lines, stopping at the first error or `exit`.
fn run_commands(session: &mut Session, input: &str) -> i32 {
    for line in input.split(';') {
        match session.execute(line) {
            Ok(Outcome::Value(value)) => print_value(&value),
            Ok(Outcome::Exit) => return 0,
            Err(e) => {
                eprintln!("msh: {e}");
                return 1;
            }
        }
    }
    0
}

fn history_path(file: &str) -> Option<PathBuf> {
    if file.is_empty() {
        return None;
    }
    match file.strip_prefix("~/") {
        Some(stripped) => dirs_home().map(|home| home.join(stripped)),
        None => Some(PathBuf::from(file)),
    }
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn run_repl(
    session: &mut Session,
    shell_config: &ShellConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    use completer::MshHelper;
    use rustyline::error::ReadlineError;
    use rustyline::history::DefaultHistory;
    use rustyline::{CompletionType, Config, Editor};

    let history = &shell_config.history;
    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(history.max_entries)?
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .auto_add_history(false)
        .build();

    let mut rl: Editor<MshHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(MshHelper::new(session.cwd().to_string())));

    let history_path = if history.enabled {
        history_path(&history.file)
    } else {
        None
    };
    if let Some(path) = &history_path {
        if let Err(e) = rl.load_history(path) {
            tracing::debug!(path = %path.display(), error = %e, "No history loaded");
        }
    }

    println!("msh v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' to quit, 'help' for help.");
    println!();

    loop {
        if let Some(helper) = rl.helper_mut() {
            helper.set_cwd(session.cwd());
        }

        let prompt = shell_config.render_prompt(session.cwd());

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                if history.enabled {
                    let _ = rl.add_history_entry(line);
                }

                match session.execute(line) {
                    Ok(Outcome::Value(value)) => print_value(&value),
                    Ok(Outcome::Exit) => break,
                    Err(e) => eprintln!("msh: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save history");
        }
    }

    Ok(())
}
