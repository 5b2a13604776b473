use clap::{Args, ValueEnum};

use tidylist_core::TodoStore;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct AddCommand {
    /// Text of the new todo
    pub text: String,
}

impl AddCommand {
    pub fn run(&self, todos: &mut TodoStore) -> Result<(), Box<dyn std::error::Error>> {
        match todos.add(&self.text) {
            Some(item) => println!("Added {}  {}", item.id, item),
            None => println!("Nothing added: todo text is empty"),
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ListCommand {
    pub fn run(&self, todos: &TodoStore) -> Result<(), Box<dyn std::error::Error>> {
        let items = todos.snapshot();

        if items.is_empty() {
            println!("No todos yet");
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items)?);
            }
            OutputFormat::Text => {
                println!("{:<18}  TODO", "ID");
                println!("{}", "-".repeat(50));
                for item in items {
                    println!("{:<18}  {}", item.id, item);
                }
                println!("\nTotal: {} todo(s)", items.len());
            }
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct DoneCommand {
    /// Id of the todo to toggle
    pub id: String,
}

impl DoneCommand {
    pub fn run(&self, todos: &mut TodoStore) -> Result<(), Box<dyn std::error::Error>> {
        if !todos.snapshot().iter().any(|t| t.id == self.id) {
            println!("No todo with id {}", self.id);
            return Ok(());
        }

        todos.toggle_completed(&self.id);
        if let Some(item) = todos.snapshot().iter().find(|t| t.id == self.id) {
            println!("{}  {}", item.id, item);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct EditCommand {
    /// Id of the todo to edit
    pub id: String,

    /// Replacement text, stored verbatim
    pub text: String,
}

impl EditCommand {
    pub fn run(&self, todos: &mut TodoStore) -> Result<(), Box<dyn std::error::Error>> {
        if !todos.snapshot().iter().any(|t| t.id == self.id) {
            println!("No todo with id {}", self.id);
            return Ok(());
        }

        todos.set_text(&self.id, self.text.clone());
        if let Some(item) = todos.snapshot().iter().find(|t| t.id == self.id) {
            println!("{}  {}", item.id, item);
        }
        Ok(())
    }
}

#[derive(Args)]
pub struct RemoveCommand {
    /// Id of the todo to delete
    pub id: String,
}

impl RemoveCommand {
    pub fn run(&self, todos: &mut TodoStore) -> Result<(), Box<dyn std::error::Error>> {
        if !todos.snapshot().iter().any(|t| t.id == self.id) {
            println!("No todo with id {}", self.id);
            return Ok(());
        }

        todos.remove(&self.id);
        println!("Removed {}", self.id);
        Ok(())
    }
}
