//! Line commands accepted by the interactive screens.

use kogito_core::{KogitoError, KogitoResult, Section};
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq)]
pub enum ViciousCircleCommand {
    /// Open the item editor for a new item and commit `text`.
    Add { section: Section, text: String },
    /// Open the item editor on an existing item and commit `text`.
    Edit {
        section: Section,
        index: usize,
        text: String,
    },
    /// Open the item editor on an existing item and leave it open.
    Open { section: Section, index: usize },
    /// Commit the open item editor.
    Save { text: String },
    Remove,
    Close,
    Overview { section: Section },
    CloseOverview,
    Show,
    Back,
    Quit,
    Help,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DiaryCommand {
    Write { text: String },
    Append { text: String },
    Show,
    Back,
    Quit,
    Help,
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    }
}

fn required_text(command: &str, text: &str) -> KogitoResult<String> {
    if text.is_empty() {
        return Err(KogitoError::InvalidInput(format!("{command} needs some text")));
    }
    Ok(text.to_string())
}

fn index(value: &str) -> KogitoResult<usize> {
    value
        .parse()
        .map_err(|_| KogitoError::InvalidInput(format!("'{value}' is not an item index")))
}

impl FromStr for ViciousCircleCommand {
    type Err = KogitoError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (command, rest) = split_word(line);
        let command_name = command.to_ascii_lowercase();

        match command_name.as_str() {
            "add" => {
                let (section, text) = split_word(rest);
                Ok(Self::Add {
                    section: section.parse()?,
                    text: required_text("add", text)?,
                })
            }
            "edit" => {
                let (section, rest) = split_word(rest);
                let (idx, text) = split_word(rest);
                Ok(Self::Edit {
                    section: section.parse()?,
                    index: index(idx)?,
                    text: required_text("edit", text)?,
                })
            }
            "open" => {
                let (section, idx) = split_word(rest);
                Ok(Self::Open {
                    section: section.parse()?,
                    index: index(idx)?,
                })
            }
            "save" => Ok(Self::Save {
                text: required_text("save", rest)?,
            }),
            "remove" => Ok(Self::Remove),
            "close" => Ok(Self::Close),
            "overview" => Ok(Self::Overview {
                section: rest.parse()?,
            }),
            "close-overview" => Ok(Self::CloseOverview),
            "show" | "" => Ok(Self::Show),
            "back" => Ok(Self::Back),
            "quit" | "exit" => Ok(Self::Quit),
            "help" | "?" => Ok(Self::Help),
            other => Err(KogitoError::InvalidInput(format!("unknown command '{other}'"))),
        }
    }
}

impl FromStr for DiaryCommand {
    type Err = KogitoError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (command, rest) = split_word(line);

        match command.to_ascii_lowercase().as_str() {
            "write" => Ok(Self::Write {
                text: rest.to_string(),
            }),
            "append" => Ok(Self::Append {
                text: required_text("append", rest)?,
            }),
            "show" | "" => Ok(Self::Show),
            "back" => Ok(Self::Back),
            "quit" | "exit" => Ok(Self::Quit),
            "help" | "?" => Ok(Self::Help),
            other => Err(KogitoError::InvalidInput(format!("unknown command '{other}'"))),
        }
    }
}

pub const VICIOUS_CIRCLE_HELP: &str = "\
commands:
  add <section> <text>          add a new item
  edit <section> <index> <text> replace an existing item
  open <section> <index>        open an existing item in the editor
  save <text>                   commit the open editor
  remove                        remove the item in the open editor
  close                         close the editor
  overview <section>            list every item of a section
  close-overview                close the section list
  show                          print the whole circle
  back | quit                   save and leave
sections: trigger, negativeThoughts, emotions, physicalSymptoms, behaviour";

pub const DIARY_HELP: &str = "\
commands:
  write <text>   replace the entry text
  append <text>  add a line to the entry
  show           print the entry
  back | quit    save and leave";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edit_with_multi_word_text() {
        let cmd: ViciousCircleCommand = "edit trigger 0 unexpected phone call".parse().unwrap();
        assert_eq!(
            cmd,
            ViciousCircleCommand::Edit {
                section: Section::Trigger,
                index: 0,
                text: "unexpected phone call".into(),
            }
        );
    }

    #[test]
    fn parses_snake_case_section() {
        let cmd: ViciousCircleCommand = "add physical_symptoms shaking hands".parse().unwrap();
        assert_eq!(
            cmd,
            ViciousCircleCommand::Add {
                section: Section::PhysicalSymptoms,
                text: "shaking hands".into(),
            }
        );
    }

    #[test]
    fn rejects_add_without_text() {
        let err = "add emotions".parse::<ViciousCircleCommand>().unwrap_err();
        assert!(matches!(err, KogitoError::InvalidInput(_)));
    }

    #[test]
    fn rejects_non_numeric_index() {
        let err = "open trigger first".parse::<ViciousCircleCommand>().unwrap_err();
        assert!(matches!(err, KogitoError::InvalidInput(_)));
    }

    #[test]
    fn blank_line_shows_state() {
        assert_eq!("  ".parse::<ViciousCircleCommand>().unwrap(), ViciousCircleCommand::Show);
        assert_eq!("".parse::<DiaryCommand>().unwrap(), DiaryCommand::Show);
    }

    #[test]
    fn diary_write_allows_clearing() {
        assert_eq!(
            "write".parse::<DiaryCommand>().unwrap(),
            DiaryCommand::Write { text: String::new() }
        );
    }
}
