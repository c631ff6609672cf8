//! Line-oriented commands for driving a [`FormSession`] from a terminal.
//!
//! ```text
//! measurement <text|#N>
//! tag add [key[=value]]     field add [key[=value]]
//! tag rm <i>                field rm <i>
//! tag key <i> <text|#N>     field key <i> <text|#N>
//! tag value <i> <text>      field value <i> <text>
//! suggest measurement|tag|field
//! show | submit | reset | help | quit
//! ```

use super::session::FormSession;
use super::slots::{PairList, SlotError};
use super::suggest::Suggestions;
use crate::protocol::Pair;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotGroup {
    Tag,
    Field,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotCommand {
    Add(Pair),
    Remove(usize),
    Key(usize, String),
    Value(usize, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestTarget {
    Measurement,
    Tag,
    Field,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Measurement(String),
    Slot(SlotGroup, SlotCommand),
    Suggest(SuggestTarget),
    Show,
    Submit,
    Reset,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a slot index")]
    BadIndex(String),
    #[error(transparent)]
    Slot(#[from] SlotError),
}

pub const HELP: &str = "\
measurement <text|#N>          set measurement (#N picks a suggestion)
tag add [key[=value]]          append a tag slot
tag rm <i>                     remove tag slot i
tag key <i> <text|#N>          edit tag key
tag value <i> <text>           edit tag value
field add|rm|key|value ...     same for fields
suggest measurement|tag|field  list suggestions
show                           print the form and the line it encodes to
submit                         send the line
reset                          clear the form
quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_start();
    let (word, rest) = split_word(line);

    match word {
        "" => Err(CommandError::Empty),
        "measurement" | "m" => Ok(Command::Measurement(rest.trim().to_string())),
        "tag" | "t" => parse_slot(SlotGroup::Tag, rest),
        "field" | "f" => parse_slot(SlotGroup::Field, rest),
        "suggest" | "s" => match rest.trim() {
            "measurement" | "m" => Ok(Command::Suggest(SuggestTarget::Measurement)),
            "tag" | "t" => Ok(Command::Suggest(SuggestTarget::Tag)),
            "field" | "f" => Ok(Command::Suggest(SuggestTarget::Field)),
            _ => Err(CommandError::Usage("suggest measurement|tag|field")),
        },
        "show" => Ok(Command::Show),
        "submit" => Ok(Command::Submit),
        "reset" => Ok(Command::Reset),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_slot(group: SlotGroup, rest: &str) -> Result<Command, CommandError> {
    let (op, rest) = split_word(rest.trim_start());
    let cmd = match op {
        "add" => {
            let rest = rest.trim();
            if rest.is_empty() {
                SlotCommand::Add(Pair::default())
            } else {
                SlotCommand::Add(Pair::parse(rest))
            }
        }
        "rm" | "remove" => SlotCommand::Remove(parse_index(rest.trim())?),
        // Only the separator after the index is consumed; the text is kept as typed.
        "key" => {
            let (index, text) = split_word(rest.trim_start());
            SlotCommand::Key(parse_index(index)?, text.to_string())
        }
        "value" => {
            let (index, text) = split_word(rest.trim_start());
            SlotCommand::Value(parse_index(index)?, text.to_string())
        }
        _ => return Err(CommandError::Usage("tag|field add|rm|key|value ...")),
    };
    Ok(Command::Slot(group, cmd))
}

fn parse_index(word: &str) -> Result<usize, CommandError> {
    word.parse().map_err(|_| CommandError::BadIndex(word.to_string()))
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (s, ""),
    }
}

/// What the caller should do after [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Edited,
    Show,
    Suggestions(Vec<String>),
    Submit,
    Help,
    Quit,
}

/// Applies edits to `session` directly; everything that needs I/O is
/// handed back to the caller.
pub fn apply(session: &mut FormSession, command: Command) -> Result<Applied, CommandError> {
    match command {
        Command::Measurement(text) => {
            let text = session.measurement_options.resolve(&text);
            session.set_measurement(text);
            Ok(Applied::Edited)
        }
        Command::Slot(group, cmd) => {
            let (list, options) = match group {
                SlotGroup::Tag => session.tags_with_options(),
                SlotGroup::Field => session.fields_with_options(),
            };
            edit_slots(list, options, cmd)?;
            Ok(Applied::Edited)
        }
        Command::Suggest(target) => {
            let options = match target {
                SuggestTarget::Measurement => &session.measurement_options,
                SuggestTarget::Tag => &session.tag_options,
                SuggestTarget::Field => &session.field_options,
            };
            Ok(Applied::Suggestions(options.options().to_vec()))
        }
        Command::Show => Ok(Applied::Show),
        Command::Submit => Ok(Applied::Submit),
        Command::Reset => {
            session.reset();
            Ok(Applied::Edited)
        }
        Command::Help => Ok(Applied::Help),
        Command::Quit => Ok(Applied::Quit),
    }
}

fn edit_slots(list: &mut PairList, keys: &Suggestions, cmd: SlotCommand) -> Result<(), CommandError> {
    match cmd {
        SlotCommand::Add(pair) => {
            list.append(keys.resolve(&pair.key), pair.value);
        }
        SlotCommand::Remove(index) => {
            if list.remove(index).is_none() {
                return Err(SlotError::OutOfRange { index, len: list.len() }.into());
            }
        }
        SlotCommand::Key(index, text) => list.set_key(index, keys.resolve(&text))?,
        SlotCommand::Value(index, text) => list.set_value(index, text)?,
    }
    Ok(())
}

/// Multi-line view of the form: slots with indexes, then the encoded line
/// or the validation message.
pub fn render(session: &FormSession) -> String {
    let mut out = format!("measurement: {}\n", session.measurement());
    for (title, list) in [("tags", session.tags()), ("fields", session.fields())] {
        out.push_str(title);
        out.push_str(":\n");
        for (i, slot) in list.iter().enumerate() {
            out.push_str(&format!("  [{}] {} = {}\n", i, slot.key, slot.value));
        }
    }
    match session.preview() {
        Ok(line) => out.push_str(&format!("line: {}", line)),
        Err(e) => out.push_str(&format!("invalid: {}", e)),
    }
    out
}
