use std::fs;
use std::io;
use std::path::Path;

use crate::error::Error;
use crate::message::{Message, Role};

const USER_HEADING: &str = "### User";
const ASSISTANT_HEADING: &str = "### Assistant";

/// Parses a transcript document into its turns, in document order.
///
/// Lines before the first turn heading (title, date, model) are ignored.
/// A heading whose body is empty or only whitespace produces no message.
/// A document without any headings yields an empty list; malformed input
/// is never an error.
pub fn parse(doc: &str) -> Vec<Message> {
    let mut scanner = Scanner::default();
    for line in doc.split_inclusive('\n') {
        scanner.feed(line);
    }
    scanner.finish()
}

/// Reads and parses the transcript at `path`.
///
/// Fails with [`ErrorKind::Unreadable`](crate::ErrorKind::Unreadable) when
/// the file cannot be opened or is not valid UTF-8.
pub fn parse_file(path: &Path) -> Result<Vec<Message>, Error> {
    let doc = fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::InvalidData {
            Error::unreadable(format!("{} is not valid UTF-8", path.display()))
        } else {
            Error::unreadable_file(path, err)
        }
    })?;
    let messages = parse(&doc);
    debug!("parsed {} messages from {}", messages.len(), path.display());
    Ok(messages)
}

#[derive(Default)]
struct Scanner {
    current_role: Option<Role>,
    buffer: String,
    messages: Vec<Message>,
}

impl Scanner {
    fn feed(&mut self, line: &str) {
        if line.starts_with(USER_HEADING) {
            self.switch_to(Role::User);
        } else if line.starts_with(ASSISTANT_HEADING) {
            self.switch_to(Role::Assistant);
        } else if self.current_role.is_some() {
            self.buffer.push_str(line);
        }
    }

    fn switch_to(&mut self, role: Role) {
        self.flush();
        self.current_role = Some(role);
    }

    fn flush(&mut self) {
        let Some(role) = self.current_role else {
            return;
        };
        let msg = Message::new(role, &self.buffer);
        self.buffer.clear();
        if msg.content().is_empty() {
            trace!("dropping empty {role} turn");
            return;
        }
        self.messages.push(msg);
    }

    fn finish(mut self) -> Vec<Message> {
        self.flush();
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::ErrorKind;
    use crate::format::serialize;

    #[test]
    fn test_parse_document() {
        let doc = "# Chat with GPT - 20250418-01\n\
                   \n\
                   Date: 2025-04-18 10:43:00\n\
                   Model: gpt-4.1-mini\n\
                   \n\
                   ## Conversation\n\
                   \n\
                   ### User\n\
                   \n\
                   What is Rust?\n\
                   \n\
                   ### Assistant\n\
                   \n\
                   A language.\n\
                   \n\
                   It has *ownership*.\n\
                   \n";
        let messages = parse(doc);
        assert_eq!(
            messages,
            vec![
                Message::user("What is Rust?"),
                Message::assistant("A language.\n\nIt has *ownership*."),
            ]
        );
    }

    #[test]
    fn test_round_trip() {
        let messages = vec![
            Message::user("Write a haiku"),
            Message::assistant("Leaves fall\n  slowly\n\nwinter comes"),
            Message::user("```rust\nfn main() {}\n```"),
            Message::user("Another one, same role"),
            Message::assistant("## Not a turn heading\n#### Nor this"),
        ];
        let ts = NaiveDate::from_ymd_opt(2025, 4, 18)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let doc = serialize("20250418-02", &messages, "gpt-4", ts);
        assert_eq!(parse(&doc), messages);
    }

    #[test]
    fn test_empty_turn_is_dropped() {
        let doc = "### User\n### User\nhello\n";
        assert_eq!(parse(doc), vec![Message::user("hello")]);

        let doc = "### User\n\n   \n### Assistant\n\nhi\n";
        assert_eq!(parse(doc), vec![Message::assistant("hi")]);

        let doc = "### Assistant\nhi\n### User\n";
        assert_eq!(parse(doc), vec![Message::assistant("hi")]);
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse("").is_empty());
        assert!(parse("# Just a title\n\nSome notes.\n").is_empty());
        assert!(parse("no trailing newline").is_empty());
    }

    #[test]
    fn test_preamble_is_ignored() {
        let doc = "stray line\n### User\nquestion";
        assert_eq!(parse(doc), vec![Message::user("question")]);
    }

    #[test]
    fn test_crlf_document() {
        let doc = "### User\r\n\r\nhello\r\nthere\r\n\r\n### Assistant\r\n\r\nhi\r\n";
        assert_eq!(
            parse(doc),
            vec![Message::user("hello\r\nthere"), Message::assistant("hi")]
        );
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"### User\n\nhello\n").unwrap();
        let messages = parse_file(file.path()).unwrap();
        assert_eq!(messages, vec![Message::user("hello")]);
    }

    #[test]
    fn test_parse_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("20250418-01.md")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreadable);

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x23, 0xff, 0xfe, 0x0a]).unwrap();
        let err = parse_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreadable);
    }
}
