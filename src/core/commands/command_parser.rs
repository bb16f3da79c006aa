// Prefix command parsing - pure text in, tagged variants out.
//
// The Discord layer resolves mentions and permissions; this module only
// decides which command a message is and extracts the free-text reason.

/// Default reason for warn/kick/ban when the invoker gives none.
pub const DEFAULT_REASON: &str = "No reason provided";

/// A parsed prefix command.
///
/// `Unknown` is a real variant on purpose: any prefixed message is a command
/// attempt and must short-circuit the AI bridge, even when the token is not
/// recognized (unrecognized commands get no reply at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Warn { reason: String },
    Warns,
    Kick { reason: String },
    Ban { reason: String },
    Joke,
    Help,
    Unknown,
}

impl Command {
    /// Parse a message. Returns `None` when the message does not start with
    /// the prefix (and so is not a command attempt at all).
    ///
    /// Everything after the prefix is trimmed and split on whitespace. The
    /// first token is the command name. For warn/kick/ban the first argument
    /// token is the mention (consumed by the Discord layer from the message's
    /// mention list); the remaining tokens joined by spaces are the reason.
    pub fn parse(content: &str, prefix: &str) -> Option<Command> {
        let rest = content.strip_prefix(prefix)?;
        let mut tokens = rest.trim().split_whitespace();
        let name = tokens.next().unwrap_or("");
        let args: Vec<&str> = tokens.collect();

        Some(match name {
            "warn" => Command::Warn {
                reason: reason_from(&args),
            },
            "warns" => Command::Warns,
            "kick" => Command::Kick {
                reason: reason_from(&args),
            },
            "ban" => Command::Ban {
                reason: reason_from(&args),
            },
            "joke" => Command::Joke,
            "help" => Command::Help,
            _ => Command::Unknown,
        })
    }
}

/// Reason = argument tokens after the mention, joined. Defaults when empty.
fn reason_from(args: &[&str]) -> String {
    if args.len() > 1 {
        args[1..].join(" ")
    } else {
        DEFAULT_REASON.to_string()
    }
}

/// Static command summary for `help`.
pub fn help_text(prefix: &str) -> String {
    format!(
        "**Moses Bones Bot Commands:**\n\
         {prefix}help – show this message\n\
         {prefix}joke – random joke\n\
         {prefix}warn @user reason – warn (staff)\n\
         {prefix}warns @user – check warns\n\
         {prefix}kick @user reason – kick (staff)\n\
         {prefix}ban @user reason – ban (staff)\n\n\
         Or just chat in this channel and I'll reply with AI 😄"
    )
}
