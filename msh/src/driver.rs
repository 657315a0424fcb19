//! Line-level driver: tokenize, dispatch, and thread the directory state
//! from one command line to the next.

use crate::error::{MshError, MshResult};
use crate::help;
use crate::ops::{self, EntryKind};
use crate::step::Step;
use crate::value::Value;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls {
        dir: String,
        kind: EntryKind,
        include_hidden: bool,
    },
    Cat(String),
    Grep {
        pattern: String,
        file: String,
    },
    Cd(String),
    Pwd,
    Touch(String),
    Rm(String),
    Help(Option<String>),
    Exit,
}

/// What a command line asked the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Value(Value),
    Exit,
}

/// Whitespace tokenization; quoting is not supported.
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

fn parse_hidden(token: &str) -> MshResult<bool> {
    match token {
        "true" | "yes" | "1" | "hidden" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(MshError::InvalidArgument(format!(
            "ls: hidden must be true or false (got '{other}')"
        ))),
    }
}

fn usage(name: &str) -> MshError {
    let text = help::get_help(name).map_or(name, |h| h.usage);
    MshError::Usage(text.to_string())
}

impl Command {
    /// Parse tokens into a command. `Ok(None)` for an empty line.
    pub fn parse(tokens: &[&str]) -> MshResult<Option<Self>> {
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match (name, args) {
            ("ls", [rest @ ..]) if rest.len() <= 3 => Self::Ls {
                dir: rest.first().map_or(".", |d| *d).to_string(),
                kind: rest.get(1).map_or(Ok(EntryKind::Both), |k| k.parse())?,
                include_hidden: rest.get(2).map_or(Ok(false), |h| parse_hidden(h))?,
            },
            ("cat", [file]) => Self::Cat((*file).to_string()),
            ("grep", [pattern, file]) => Self::Grep {
                pattern: (*pattern).to_string(),
                file: (*file).to_string(),
            },
            ("cd", []) => Self::Cd(".".to_string()),
            ("cd", [dir]) => Self::Cd((*dir).to_string()),
            ("pwd", []) => Self::Pwd,
            ("touch", [file]) => Self::Touch((*file).to_string()),
            ("rm", [file]) => Self::Rm((*file).to_string()),
            ("help", []) => Self::Help(None),
            ("help", [topic]) => Self::Help(Some((*topic).to_string())),
            ("exit", []) => Self::Exit,
            (known, _) if help::get_help(known).is_some() => return Err(usage(known)),
            (unknown, _) => return Err(MshError::UnknownCommand(unknown.to_string())),
        };
        Ok(Some(command))
    }

    /// Run the command against `state`, returning its outcome and the state
    /// for the next line.
    pub fn run(self, state: String) -> MshResult<(Outcome, String)> {
        let (value, state) = match self {
            Self::Ls {
                dir,
                kind,
                include_hidden,
            } => ops::ls(dir, kind, include_hidden)
                .map(Value::EntryList)
                .run(state)?,
            Self::Cat(file) => ops::cat(file).map(Value::Text).run(state)?,
            Self::Grep { pattern, file } => ops::cat(file)
                .bind(|text| ops::grep(pattern, text))
                .map(Value::LineList)
                .run(state)?,
            Self::Cd(dir) => ops::cd(dir).map(Value::from).run(state)?,
            Self::Pwd => ops::pwd().map(Value::Path).run(state)?,
            Self::Touch(file) => ops::touch(file).map(Value::from).run(state)?,
            Self::Rm(file) => ops::rm(file).map(Value::from).run(state)?,
            Self::Help(topic) => (help_text(topic.as_deref())?, state),
            Self::Exit => return Ok((Outcome::Exit, state)),
        };
        Ok((Outcome::Value(value), state))
    }
}

fn help_text(topic: Option<&str>) -> MshResult<Value> {
    match topic {
        None => Ok(Value::Text(help::format_help_list())),
        Some(name) => help::get_help(name)
            .map(|h| Value::Text(help::format_help(h)))
            .ok_or_else(|| MshError::UnknownCommand(name.to_string())),
    }
}

/// Owns the directory state between command lines.
#[derive(Debug, Clone)]
pub struct Session {
    cwd: String,
}

impl Session {
    pub fn new(cwd: impl Into<String>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Start from the process working directory, or `.` if it cannot be read.
    pub fn from_current_dir() -> Self {
        let cwd = std::env::current_dir().map_or_else(
            |e| {
                tracing::warn!(error = %e, "Cannot read working directory, starting at '.'");
                ".".to_string()
            },
            |p| p.to_string_lossy().into_owned(),
        );
        Self::new(cwd)
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Execute one command line.
    ///
    /// On success the session adopts the state the command produced; on
    /// error the state is left as it was.
    pub fn execute(&mut self, line: &str) -> MshResult<Outcome> {
        let Some(command) = Command::parse(&tokenize(line))? else {
            return Ok(Outcome::Value(Value::Empty));
        };
        tracing::debug!(?command, cwd = %self.cwd, "execute");

        let (outcome, next) = command.run(self.cwd.clone())?;
        if next != self.cwd {
            tracing::debug!(from = %self.cwd, to = %next, "state changed");
        }
        self.cwd = next;
        Ok(outcome)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_current_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> MshResult<Option<Command>> {
        Command::parse(&tokenize(line))
    }

    #[test]
    fn tokenize_splits_on_any_whitespace() {
        assert_eq!(tokenize("  ls \t src  file "), vec!["ls", "src", "file"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn empty_line_parses_to_nothing() {
        assert_eq!(parse("").unwrap(), None);
    }

    #[test]
    fn ls_defaults() {
        assert_eq!(
            parse("ls").unwrap(),
            Some(Command::Ls {
                dir: ".".into(),
                kind: EntryKind::Both,
                include_hidden: false
            })
        );
        assert_eq!(
            parse("ls src dir true").unwrap(),
            Some(Command::Ls {
                dir: "src".into(),
                kind: EntryKind::Dir,
                include_hidden: true
            })
        );
    }

    #[test]
    fn ls_rejects_bad_selectors() {
        assert!(matches!(parse("ls . files"), Err(MshError::InvalidArgument(_))));
        assert!(matches!(parse("ls . file maybe"), Err(MshError::InvalidArgument(_))));
        assert!(matches!(parse("ls a b c d"), Err(MshError::Usage(_))));
    }

    #[test]
    fn arity_errors_are_usage_errors() {
        assert!(matches!(parse("cat"), Err(MshError::Usage(_))));
        assert!(matches!(parse("grep onlypattern"), Err(MshError::Usage(_))));
        assert!(matches!(parse("pwd extra"), Err(MshError::Usage(_))));
        assert!(matches!(parse("rm a b"), Err(MshError::Usage(_))));
    }

    #[test]
    fn unknown_command() {
        let err = parse("frobnicate x").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: frobnicate");
    }

    #[test]
    fn dash_arguments_are_plain_operands() {
        assert_eq!(
            parse("grep --help notes.txt").unwrap(),
            Some(Command::Grep {
                pattern: "--help".into(),
                file: "notes.txt".into()
            })
        );
        assert_eq!(parse("cat -h").unwrap(), Some(Command::Cat("-h".into())));
        assert_eq!(
            parse("ls -h").unwrap(),
            Some(Command::Ls {
                dir: "-h".into(),
                kind: EntryKind::Both,
                include_hidden: false
            })
        );
        assert!(matches!(parse("pwd --help"), Err(MshError::Usage(_))));
        assert_eq!(parse("help").unwrap(), Some(Command::Help(None)));
    }

    #[test]
    fn session_greps_for_dash_patterns_and_reads_dash_files() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.txt"), "plain line\nuse --help for info").unwrap();
        std::fs::write(temp.path().join("-h"), "data").unwrap();
        let mut session = Session::new(temp.path().to_string_lossy().into_owned());

        assert_eq!(
            session.execute("grep --help notes.txt").unwrap(),
            Outcome::Value(Value::LineList(vec!["use --help for info".into()]))
        );
        assert_eq!(
            session.execute("cat -h").unwrap(),
            Outcome::Value(Value::Text("data".into()))
        );
    }

    #[test]
    fn exit_and_cd_default() {
        assert_eq!(parse("exit").unwrap(), Some(Command::Exit));
        assert_eq!(parse("cd").unwrap(), Some(Command::Cd(".".into())));
    }

    #[test]
    fn session_threads_cd_into_pwd() {
        let mut session = Session::new("/tmp/proj");
        assert_eq!(
            session.execute("cd ..").unwrap(),
            Outcome::Value(Value::Empty)
        );
        assert_eq!(session.cwd(), "/tmp");
        assert_eq!(
            session.execute("pwd").unwrap(),
            Outcome::Value(Value::Path("/tmp".into()))
        );
    }

    #[test]
    fn session_keeps_state_on_error() {
        let mut session = Session::new("/tmp/proj");
        assert!(session.execute("bogus").is_err());
        assert!(session.execute("ls . nonsense").is_err());
        assert_eq!(session.cwd(), "/tmp/proj");
    }

    #[test]
    fn session_exit() {
        let mut session = Session::new("/");
        assert_eq!(session.execute("exit").unwrap(), Outcome::Exit);
    }

    #[test]
    fn help_for_unknown_topic_fails() {
        let mut session = Session::new("/");
        assert!(matches!(
            session.execute("help frob"),
            Err(MshError::UnknownCommand(_))
        ));
        let Outcome::Value(Value::Text(text)) = session.execute("help cat").unwrap() else {
            panic!("expected help text");
        };
        assert!(text.contains("Usage: cat FILE"));
    }
}
