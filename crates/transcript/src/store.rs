use std::fs;
use std::path::{self, Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::error::Error;
use crate::format::serialize;
use crate::naming::{is_transcript_filename, list_transcripts, next_filename};
use crate::parser::parse_file;
use crate::session::{Binding, Session, file_stem};

/// A directory of transcript files.
///
/// The store itself holds no conversation state. Operations take the
/// [`Session`] they act on, and only change it once the filesystem side
/// has succeeded.
#[derive(Clone, Debug)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first save.
    #[inline]
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory this store reads from and writes to.
    #[inline]
    pub fn directory(&self) -> &Path {
        &self.dir
    }

    /// Returns the path of `filename` inside the store.
    #[inline]
    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Lists the stored transcripts, newest first.
    #[inline]
    pub fn list_transcripts(&self) -> Result<Vec<String>, Error> {
        list_transcripts(&self.dir)
    }

    /// Loads `filename` into `session`, replacing its messages and binding
    /// the session to that file.
    ///
    /// Only transcript file names are accepted, so nothing outside the
    /// store directory can be read. On error the session is left as is.
    pub fn load(
        &self,
        session: &mut Session,
        filename: &str,
    ) -> Result<(), Error> {
        if !is_transcript_filename(filename) {
            return Err(Error::unreadable(format!(
                "`{filename}` is not a transcript file name"
            )));
        }
        let messages = parse_file(&self.path_of(filename))?;
        info!("loaded {filename} with {} messages", messages.len());
        session.replace(filename.to_owned(), messages);
        Ok(())
    }

    /// Saves the whole conversation, stamped with the local time.
    ///
    /// See [`save_at`](Self::save_at).
    #[inline]
    pub fn save(
        &self,
        session: &mut Session,
        model: &str,
    ) -> Result<PathBuf, Error> {
        self.save_at(session, model, Local::now().naive_local())
    }

    /// Saves the whole conversation as of `now` and returns the absolute
    /// path written.
    ///
    /// An unbound session gets a new file name for `now`'s date and is
    /// bound to it once the write succeeds. A bound session overwrites its
    /// file in full. If anything fails, the session keeps its messages and
    /// its previous binding.
    pub fn save_at(
        &self,
        session: &mut Session,
        model: &str,
        now: NaiveDateTime,
    ) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.dir)
            .map_err(|err| Error::write_failed(&self.dir, err))?;

        let filename = match session.binding() {
            Binding::Bound(filename) => filename.clone(),
            Binding::Unbound => next_filename(&self.dir, now.date())?,
        };
        let doc =
            serialize(file_stem(&filename), session.messages(), model, now);

        let path = self.path_of(&filename);
        fs::write(&path, doc).map_err(|err| Error::write_failed(&path, err))?;
        let path = path::absolute(&path)
            .map_err(|err| Error::write_failed(&path, err))?;

        if session.current_file() != Some(filename.as_str()) {
            info!("bound conversation to {filename}");
            session.bind(filename);
        }
        debug!(
            "saved {} messages to {}",
            session.messages().len(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::ErrorKind;
    use crate::message::Message;
    use crate::parser::parse;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn turn(session: &mut Session, question: &str, answer: &str) {
        session.push(Message::user(question));
        session.push(Message::assistant(answer));
    }

    #[test]
    fn test_first_save_binds() {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::new(dir.path().join("vault"));
        let mut session = Session::new();
        turn(&mut session, "Hello", "Hi");

        let path = store.save_at(&mut session, "gpt-4", at(18, 10)).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("vault/20250418-01.md"));
        assert_eq!(session.current_file(), Some("20250418-01.md"));
        assert_eq!(session.conversation_id(), "20250418-01");

        let doc = fs::read_to_string(&path).unwrap();
        assert!(doc.starts_with("# Chat with GPT - 20250418-01\n"));
        assert!(doc.contains("Date: 2025-04-18 10:00:00\n"));
        assert!(doc.contains("Model: gpt-4\n"));
    }

    #[test]
    fn test_binding_is_sticky() {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::new(dir.path());
        let mut session = Session::new();

        for (i, day) in [18, 18, 19].into_iter().enumerate() {
            turn(&mut session, &format!("q{i}"), &format!("a{i}"));
            let path = store.save_at(&mut session, "m", at(day, 9)).unwrap();
            assert!(path.ends_with("20250418-01.md"));

            // Each save fully supersedes the previous one.
            let saved = parse(&fs::read_to_string(&path).unwrap());
            assert_eq!(saved, session.messages());
            assert_eq!(saved.len(), (i + 1) * 2);
        }
        assert_eq!(store.list_transcripts().unwrap(), vec!["20250418-01.md"]);
    }

    #[test]
    fn test_new_conversation_allocates_next_file() {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::new(dir.path());
        let mut session = Session::new();
        turn(&mut session, "one", "1");
        store.save_at(&mut session, "m", at(18, 9)).unwrap();

        session.start_new_conversation();
        turn(&mut session, "two", "2");
        let path = store.save_at(&mut session, "m", at(18, 10)).unwrap();
        assert!(path.ends_with("20250418-02.md"));
        assert_eq!(
            store.list_transcripts().unwrap(),
            vec!["20250418-02.md", "20250418-01.md"]
        );
    }

    #[test]
    fn test_load_rebinds() {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::new(dir.path());

        let mut first = Session::new();
        turn(&mut first, "first question", "first answer");
        store.save_at(&mut first, "m", at(17, 9)).unwrap();

        let mut session = Session::new();
        turn(&mut session, "second question", "second answer");
        store.save_at(&mut session, "m", at(18, 9)).unwrap();
        assert_eq!(session.current_file(), Some("20250418-01.md"));

        store.load(&mut session, "20250417-01.md").unwrap();
        assert_eq!(session.current_file(), Some("20250417-01.md"));
        assert_eq!(session.conversation_id(), "20250417-01");
        assert_eq!(session.messages(), first.messages());

        // Continuing the loaded conversation writes back into its file.
        turn(&mut session, "follow up", "sure");
        let path = store.save_at(&mut session, "m", at(18, 11)).unwrap();
        assert!(path.ends_with("20250417-01.md"));
        let saved = parse(&fs::read_to_string(&path).unwrap());
        assert_eq!(saved.len(), 4);
    }

    #[test]
    fn test_load_errors_keep_session() {
        let dir = TempDir::new().unwrap();
        let store = TranscriptStore::new(dir.path());
        let mut session = Session::new();
        turn(&mut session, "keep", "me");

        let err = store.load(&mut session, "20250418-01.md").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreadable);

        let err = store.load(&mut session, "../secret.md").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unreadable);

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.binding(), &Binding::Unbound);
    }

    #[test]
    fn test_failed_save_keeps_messages() {
        let dir = TempDir::new().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("vault");
        fs::write(&blocker, "").unwrap();
        let store = TranscriptStore::new(&blocker);

        let mut session = Session::new();
        turn(&mut session, "don't", "lose me");
        let id = session.conversation_id().to_owned();

        let err = store.save_at(&mut session, "m", at(18, 9)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteFailed);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.binding(), &Binding::Unbound);
        assert_eq!(session.conversation_id(), id);
    }

    #[test]
    fn test_save_overflow() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("20250418-99.md"), "").unwrap();
        let store = TranscriptStore::new(dir.path());
        let mut session = Session::new();
        turn(&mut session, "q", "a");

        let err = store.save_at(&mut session, "m", at(18, 9)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SequenceOverflow);
        assert_eq!(session.binding(), &Binding::Unbound);
    }
}
