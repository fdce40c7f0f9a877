//! Parsing of REPL input lines.

/// Which transcript `/load` refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadTarget {
    /// A file name such as `20250418-01.md`.
    Name(String),
    /// A 1-based position in the `/list` output.
    Index(usize),
}

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Send this text to the model.
    Say(String),
    /// Start a new conversation.
    New,
    /// List saved transcripts.
    List,
    /// Load a saved transcript.
    Load(LoadTarget),
    /// Show the available commands.
    Help,
    /// Leave the program.
    Quit,
    /// A slash command that doesn't exist, or misses its argument.
    Unknown(String),
}

/// Help text listing every command.
pub const HELP: &str = "\
/new            start a new conversation
/list           list saved transcripts, newest first
/load <name|n>  continue a saved transcript
/help           show this help
/quit           leave
anything else is sent to the model";

impl Command {
    /// Parses a line. Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Some(Command::Say(line.to_owned()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let cmd = match (name, arg) {
            ("new", "") => Command::New,
            ("list" | "ls", "") => Command::List,
            ("load", arg) if !arg.is_empty() => {
                Command::Load(match arg.parse::<usize>() {
                    Ok(idx) => LoadTarget::Index(idx),
                    Err(_) => LoadTarget::Name(arg.to_owned()),
                })
            }
            ("help" | "?", "") => Command::Help,
            ("quit" | "exit" | "q", "") => Command::Quit,
            _ => Command::Unknown(line.to_owned()),
        };
        Some(cmd)
    }
}
