// User-facing strings for the relay commands.

pub const NEEDS_ADMIN: &str = "You need administrator permission to use this command!";
pub const INVALID_PARAMETERS: &str = "Invalid parameters!";
pub const INVALID_REPORT: &str = "Invalid report content or channel!";
pub const BOT_CANNOT_SEND: &str =
    "The bot does not have permission to send messages in that channel!";

pub const SAY_FAILED: &str = "An error occurred while sending the message!";
pub const EMBED_FAILED: &str = "An error occurred while sending the embed!";
pub const DM_FAILED: &str = "An error occurred while sending the DM!";
pub const REPORT_FAILED: &str = "An error occurred while sending the report!";

pub const REPORT_SUBMITTED: &str = "Your report has been submitted!";
pub const REPORT_HEADING: &str = "**Report**";

pub const DM_TITLE: &str = "You received a message";
pub const DM_SOURCE_FIELD: &str = "Source server";
pub const DM_SENDER_FIELD: &str = "Sender";
pub const UNKNOWN_ORIGIN: &str = "Unknown server";

pub fn message_sent(channel_name: &str) -> String {
    format!("Message sent to {}", channel_name)
}

pub fn dm_sent(user_name: &str) -> String {
    format!("Message sent to {}'s DMs!", user_name)
}

pub fn dm_footer(origin_name: &str) -> String {
    format!("Sent from {}", origin_name)
}

/// Heading, blank line, then the reporter's text.
pub fn report_body(issue: &str) -> String {
    format!("{}\n\n{}", REPORT_HEADING, issue)
}
