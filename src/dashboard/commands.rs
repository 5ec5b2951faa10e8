//! # Line Commands
//!
//! The shell's stand-in for clicks: each input line is parsed into one
//! [`Command`]. Arguments are whitespace separated; double quotes keep
//! spaces inside a single argument (`set bio "Ten years of CBT"`).

use crate::dashboard::models::RecordId;
use crate::dashboard::view_models::{PageButton, Tab};
use anyhow::{anyhow, bail, Result};
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    SelectTab(Tab),
    Logout,
    Navigate(PageButton),
    Create,
    Edit(RecordId),
    SetField { name: String, value: String },
    Attach(PathBuf),
    Submit,
    Cancel,
    /// Close the modal without the cancel button (Escape, backdrop)
    Dismiss,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
login <email> <password>   sign in
tab home|expert|exercise   switch tab
page <n> | first | prev | next | last
create | edit <id>         open the form
set <field> <value>        edit a form field (quote values with spaces)
attach <path>              attach a media file
submit | cancel | close     save, cancel or dismiss the form
logout | quit";

fn tokenizer() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("token pattern is valid"))
}

fn tokenize(line: &str) -> Vec<String> {
    tokenizer()
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

impl Command {
    /// Parse one input line; `Ok(None)` for blank lines
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let tokens = tokenize(line.trim());
        let Some((verb, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match (verb.to_ascii_lowercase().as_str(), args) {
            ("login", [email, password]) => Command::Login {
                email: email.clone(),
                password: password.clone(),
            },
            ("tab", [tab]) => Command::SelectTab(tab.parse()?),
            ("logout", []) => Command::Logout,
            ("page", [page]) => {
                let page = page
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid page number '{page}'"))?;
                Command::Navigate(PageButton::Page(page))
            }
            ("first", []) => Command::Navigate(PageButton::First),
            ("prev" | "previous", []) => Command::Navigate(PageButton::Previous),
            ("next", []) => Command::Navigate(PageButton::Next),
            ("last", []) => Command::Navigate(PageButton::Last),
            ("create", []) => Command::Create,
            ("edit", [id]) => Command::Edit(RecordId::new(id.clone())),
            ("set", [name, rest @ ..]) if !rest.is_empty() => Command::SetField {
                name: name.clone(),
                value: rest.join(" "),
            },
            ("attach", [path]) => Command::Attach(PathBuf::from(shellexpand::tilde(path).as_ref())),
            ("submit" | "save", []) => Command::Submit,
            ("cancel", []) => Command::Cancel,
            ("close" | "esc", []) => Command::Dismiss,
            ("help" | "?", []) => Command::Help,
            ("quit" | "q" | "exit", []) => Command::Quit,
            (other, _) => bail!("unknown or malformed command '{other}' (try 'help')"),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_should_ignore_blank_lines() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn parse_should_read_login_credentials() {
        assert_eq!(
            Command::parse("login admin@example.com s3cret").unwrap(),
            Some(Command::Login {
                email: "admin@example.com".to_string(),
                password: "s3cret".to_string()
            })
        );
    }

    #[test]
    fn parse_should_keep_quoted_values_together() {
        assert_eq!(
            Command::parse(r#"set title "Box Breathing""#).unwrap(),
            Some(Command::SetField {
                name: "title".to_string(),
                value: "Box Breathing".to_string()
            })
        );
    }

    #[test]
    fn parse_should_join_unquoted_value_words() {
        assert_eq!(
            Command::parse("set description breathe in four counts").unwrap(),
            Some(Command::SetField {
                name: "description".to_string(),
                value: "breathe in four counts".to_string()
            })
        );
    }

    #[test]
    fn parse_should_allow_empty_quoted_value() {
        assert_eq!(
            Command::parse(r#"set bio """#).unwrap(),
            Some(Command::SetField {
                name: "bio".to_string(),
                value: String::new()
            })
        );
    }

    #[test]
    fn parse_should_map_pagination_buttons() {
        assert_eq!(
            Command::parse("page 3").unwrap(),
            Some(Command::Navigate(PageButton::Page(3)))
        );
        assert_eq!(
            Command::parse("PREV").unwrap(),
            Some(Command::Navigate(PageButton::Previous))
        );
        assert_eq!(
            Command::parse("last").unwrap(),
            Some(Command::Navigate(PageButton::Last))
        );
    }

    #[test]
    fn parse_should_reject_bad_input() {
        assert!(Command::parse("page -1").is_err());
        assert!(Command::parse("page two").is_err());
        assert!(Command::parse("tab settings").is_err());
        assert!(Command::parse("delete 4").is_err());
        assert!(Command::parse("edit").is_err());
        assert!(Command::parse("set title").is_err());
    }

    #[test]
    fn parse_should_tell_cancel_from_dismiss() {
        assert_eq!(Command::parse("cancel").unwrap(), Some(Command::Cancel));
        assert_eq!(Command::parse("close").unwrap(), Some(Command::Dismiss));
        assert_eq!(Command::parse("save").unwrap(), Some(Command::Submit));
    }

    #[test]
    fn parse_should_read_tabs_and_ids() {
        assert_eq!(
            Command::parse("tab exercise").unwrap(),
            Some(Command::SelectTab(Tab::Exercise))
        );
        assert_eq!(
            Command::parse("edit 42").unwrap(),
            Some(Command::Edit(RecordId::from(42_u64)))
        );
    }
}
