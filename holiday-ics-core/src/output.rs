//! Writing the generated calendar to disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::HolidayIcsResult;

/// Write `content` to `path`, replacing any existing file.
///
/// The content goes to a temporary file in the same directory first and is
/// then renamed over the target, so readers never see a half-written
/// calendar. Missing parent directories are created.
pub fn write_calendar(path: &Path, content: &str) -> HolidayIcsResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_file_and_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("calendar.ics");

        write_calendar(&path, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn overwrites_existing_content_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.ics");
        std::fs::write(&path, "a much longer previous calendar body").unwrap();

        write_calendar(&path, "short").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn writes_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.ics");

        write_calendar(&path, "SUMMARY:🎋 七夕\r\n").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), "SUMMARY:🎋 七夕\r\n".as_bytes());
    }

    #[test]
    fn leaves_no_temporary_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.ics");

        write_calendar(&path, "x").unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
