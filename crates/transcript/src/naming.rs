//! Transcript file names: `YYYYMMDD-NN.md`.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::Error;

/// The highest sequence number a day can have.
///
/// Sequence numbers are two digits wide. A 100th file would be named
/// `-100.md`, which no longer matches the file name grammar and would be
/// invisible to both listing and sequencing, so allocation stops here.
pub const MAX_SEQUENCE: u32 = 99;

static TRANSCRIPT_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{8})-(\d{2})\.md$").expect("valid file name pattern")
});

/// Returns whether `name` is a transcript file name.
#[inline]
pub fn is_transcript_filename(name: &str) -> bool {
    TRANSCRIPT_FILENAME.is_match(name)
}

/// Lists the transcript files in `dir`, newest first.
///
/// The fixed-width, zero-padded names make descending lexicographic order
/// the same as descending date and sequence order. Entries that are not
/// transcript files are skipped. A missing directory has no transcripts.
pub fn list_transcripts(dir: &Path) -> Result<Vec<String>, Error> {
    let mut names = transcript_names(dir)?;
    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names)
}

/// Returns the next free transcript file name for `today` in `dir`.
///
/// The sequence continues from the highest number in use for that day, so
/// gaps left by removed files are never reused. Nothing is created on disk.
pub fn next_filename(dir: &Path, today: NaiveDate) -> Result<String, Error> {
    let day = today.format("%Y%m%d").to_string();
    let highest = transcript_names(dir)?
        .iter()
        .filter_map(|name| {
            let caps = TRANSCRIPT_FILENAME.captures(name)?;
            if caps[1] != day {
                return None;
            }
            caps[2].parse::<u32>().ok()
        })
        .max()
        .unwrap_or(0);

    if highest >= MAX_SEQUENCE {
        warn!("all sequence numbers for {day} are taken");
        return Err(Error::sequence_overflow(&day));
    }

    let filename = format!("{day}-{:02}.md", highest + 1);
    debug!("allocated transcript name {filename}");
    Ok(filename)
}

fn transcript_names(dir: &Path) -> Result<Vec<String>, Error> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            trace!("{} does not exist yet", dir.display());
            return Ok(vec![]);
        }
        Err(err) => return Err(Error::directory_unavailable(dir, err)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| Error::directory_unavailable(dir, err))?;
        // Non UTF-8 names can never match the grammar.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if is_transcript_filename(&name) {
            names.push(name);
        }
    }
    Ok(names)
}
