//! REPL input parsing.

use regimen_core::catalog::ProductId;

pub const COMMAND_NAMES: &[&str] = &[
    "/search", "/category", "/more", "/toggle", "/details", "/remove", "/clear", "/generate",
    "/copy", "/products", "/selected", "/help",
];

pub const HELP_TEXT: &str = "\
/search <text>    filter products by name, brand or description (empty clears)
/category [name]  filter by category (no name shows all and lists categories)
/more             reveal the next page of products
/toggle <id>      select or deselect a product
/details <id>     show or hide a product description
/remove <id>      remove a product from the selection
/clear            clear the whole selection
/generate         generate a routine for the selected products
/copy             copy the last generated routine to the clipboard
/products         show the product grid
/selected         show the selected products
/help             show this help
quit              exit
Anything else is sent to the assistant as a chat message.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Category(String),
    More,
    Toggle(ProductId),
    Details(ProductId),
    Remove(ProductId),
    Clear,
    Generate,
    Copy,
    Products,
    Selected,
    Help,
    Quit,
    Chat(String),
    /// Malformed input; the message is shown to the user.
    Invalid(String),
}

pub fn parse(line: &str) -> Command {
    let line = line.trim();
    if line == "quit" || line == "exit" {
        return Command::Quit;
    }
    if !line.starts_with('/') {
        return Command::Chat(line.to_string());
    }

    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };

    match name {
        "/search" => Command::Search(arg.to_string()),
        "/category" => Command::Category(arg.to_string()),
        "/more" => Command::More,
        "/toggle" => parse_id(name, arg).map_or_else(|e| e, Command::Toggle),
        "/details" => parse_id(name, arg).map_or_else(|e| e, Command::Details),
        "/remove" => parse_id(name, arg).map_or_else(|e| e, Command::Remove),
        "/clear" => Command::Clear,
        "/generate" => Command::Generate,
        "/copy" => Command::Copy,
        "/products" => Command::Products,
        "/selected" => Command::Selected,
        "/help" => Command::Help,
        _ => Command::Invalid(format!("Unknown command: {name}. Type /help for a list.")),
    }
}

fn parse_id(name: &str, arg: &str) -> Result<ProductId, Command> {
    arg.parse::<ProductId>()
        .map_err(|_| Command::Invalid(format!("Usage: {name} <id>")))
}
