use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::message::Message;

const TITLE_PREFIX: &str = "# Chat with GPT - ";
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a conversation into the on-disk transcript format.
///
/// ```text
/// # Chat with GPT - <transcript_id>
///
/// Date: YYYY-MM-DD HH:MM:SS
/// Model: <model>
///
/// ## Conversation
///
/// ### User
///
/// <content>
///
/// ### Assistant
///
/// <content>
///
/// ```
///
/// This function is pure. Writing the document out is left to the caller.
pub fn serialize(
    transcript_id: &str,
    messages: &[Message],
    model: &str,
    timestamp: NaiveDateTime,
) -> String {
    let mut doc = String::new();
    // Writing into a `String` cannot fail.
    let _ = write!(doc, "{TITLE_PREFIX}{transcript_id}\n\n");
    let _ = writeln!(doc, "Date: {}", timestamp.format(DATE_FORMAT));
    let _ = write!(doc, "Model: {model}\n\n");
    doc.push_str("## Conversation\n\n");

    for msg in messages {
        let _ = write!(
            doc,
            "### {}\n\n{}\n\n",
            msg.role().heading(),
            msg.content()
        );
    }
    doc
}
