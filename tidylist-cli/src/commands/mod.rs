mod config_cmd;
mod todo;

pub use config_cmd::ConfigCommand;
pub use todo::{AddCommand, DoneCommand, EditCommand, ListCommand, RemoveCommand};
