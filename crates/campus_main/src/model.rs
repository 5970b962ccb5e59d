/// A line typed into the interactive chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/new`: discard the transcript and start over.
    New,
    /// `/exit`: leave the chat.
    Exit,
    /// `/help`: list these commands.
    Help,
    /// Anything else is sent to the assistant.
    Message(String),
}

impl Command {
    pub fn available_commands() -> [(&'static str, &'static str); 3] {
        [
            ("/new", "Start a new conversation"),
            ("/exit", "Leave the chat"),
            ("/help", "Show this help"),
        ]
    }

    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "/new" => Command::New,
            "/exit" => Command::Exit,
            "/help" => Command::Help,
            text => Command::Message(text.to_string()),
        }
    }
}
