pub const MARK_PENDING: &str = "[ ]";
pub const MARK_PROCESSING: &str = "[~]";
pub const MARK_COMPLETED: &str = "[x]";
pub const MARK_ERRORED: &str = "[!]";

pub const PROMPT: &str = "url> ";
pub const COMMAND_TOGGLE_TRANSLATION: &str = ":t";
pub const COMMAND_QUIT: &str = ":q";
pub const INTERACTIVE_HELP: &str =
    "Paste a blog URL and press Enter. :t toggles the Urdu translation, :q quits.";
