//! REPL command parsing.

/// Every slash command, for completion and hints.
pub const COMMANDS: &[&str] = &[
    "/home",
    "/shop",
    "/wishlist",
    "/about",
    "/view",
    "/close",
    "/wish",
    "/category",
    "/size",
    "/color",
    "/clear",
    "/recs",
    "/order",
    "/history",
    "/help",
    "/quit",
];

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    Shop,
    Wishlist,
    About,
    /// Product id or full display name.
    View(String),
    Close,
    Wish(String),
    Category(String),
    Size(String),
    Color(String),
    Clear,
    Recs,
    Order {
        size: Option<String>,
        color: Option<String>,
    },
    History,
    Help,
    Quit,
    /// Anything that is not a slash command goes to the stylist.
    Chat(String),
}

fn required(name: &str, arg: &str) -> Result<String, String> {
    if arg.is_empty() {
        Err(format!("Usage: {name} <value>"))
    } else {
        Ok(arg.to_string())
    }
}

/// Parses a trimmed, non-empty input line.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Ok(Command::Chat(line.to_string()));
    }

    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };

    let command = match name {
        "/home" => Command::Home,
        "/shop" => Command::Shop,
        "/wishlist" => Command::Wishlist,
        "/about" => Command::About,
        "/view" => Command::View(required(name, arg)?),
        "/close" => Command::Close,
        "/wish" => Command::Wish(required(name, arg)?),
        "/category" => Command::Category(required(name, arg)?),
        "/size" => Command::Size(required(name, arg)?),
        "/color" => Command::Color(required(name, arg)?),
        "/clear" => Command::Clear,
        "/recs" => Command::Recs,
        "/order" => {
            // Size is a single token; the rest of the line is the color
            let (size, color) = match arg.split_once(char::is_whitespace) {
                Some((size, color)) => (Some(size.to_string()), Some(color.trim().to_string())),
                None if arg.is_empty() => (None, None),
                None => (Some(arg.to_string()), None),
            };
            Command::Order { size, color }
        }
        "/history" => Command::History,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => return Err(format!("Unknown command: {other}. Type /help for a list.")),
    };
    Ok(command)
}
