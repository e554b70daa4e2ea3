//! Edits given on the command line, e.g. `add:buy milk`, `toggle:3`, `delete:1`.

use std::str::FromStr;

use thiserror::Error;
use todo_runtime::{TodoStore, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(i64),
    Delete(i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("expected <verb>:<argument>, got {0:?}")]
    MissingSeparator(String),
    #[error("unknown verb {0:?}, expected add, toggle or delete")]
    UnknownVerb(String),
    #[error("invalid id {0:?}")]
    InvalidId(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = raw
            .split_once(':')
            .ok_or_else(|| CommandError::MissingSeparator(raw.to_string()))?;
        let parse_id = |arg: &str| {
            arg.trim()
                .parse::<i64>()
                .map_err(|_| CommandError::InvalidId(arg.to_string()))
        };
        match verb {
            "add" => Ok(Command::Add(arg.to_string())),
            "toggle" => parse_id(arg).map(Command::Toggle),
            "delete" => parse_id(arg).map(Command::Delete),
            other => Err(CommandError::UnknownVerb(other.to_string())),
        }
    }
}

impl Command {
    pub fn apply<T: Transport>(&self, store: &mut TodoStore<T>) {
        match self {
            Command::Add(title) => store.add_todo(title.clone()),
            Command::Toggle(id) => store.toggle_todo(*id),
            Command::Delete(id) => store.delete_todo(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::{ControllerConfig, Todo};
    use todo_runtime::ReqwestTransport;

    #[test]
    fn parses_each_verb() {
        assert_eq!("add:buy milk".parse::<Command>(), Ok(Command::Add("buy milk".to_string())));
        assert_eq!("toggle:3".parse::<Command>(), Ok(Command::Toggle(3)));
        assert_eq!("delete: 12".parse::<Command>(), Ok(Command::Delete(12)));
    }

    #[test]
    fn title_may_contain_separator() {
        assert_eq!(
            "add:note: call back".parse::<Command>(),
            Ok(Command::Add("note: call back".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            "toggle".parse::<Command>(),
            Err(CommandError::MissingSeparator("toggle".to_string()))
        );
        assert_eq!(
            "rename:1".parse::<Command>(),
            Err(CommandError::UnknownVerb("rename".to_string()))
        );
        assert_eq!(
            "delete:one".parse::<Command>(),
            Err(CommandError::InvalidId("one".to_string()))
        );
    }

    #[test]
    fn commands_apply_in_order() {
        let transport = ReqwestTransport::new(std::time::Duration::from_secs(1)).unwrap();
        let mut store = TodoStore::new(ControllerConfig::default(), transport);

        for raw in ["add:a", "add:b", "toggle:2", "delete:1"] {
            raw.parse::<Command>().unwrap().apply(&mut store);
        }
        assert_eq!(store.todos(), &[Todo::new(2, "b", true)]);
    }
}
