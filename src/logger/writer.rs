//! Access log sink
//!
//! Access lines go to stdout unless `logging.access_log_file` names a file,
//! which is opened once in append mode and shared by all connection tasks.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

static ACCESS_SINK: OnceLock<AccessSink> = OnceLock::new();

pub enum AccessSink {
    Stdout,
    File(Mutex<File>),
}

impl AccessSink {
    fn open(access_log_file: Option<&str>) -> io::Result<Self> {
        match access_log_file {
            Some(path) => Ok(Self::File(Mutex::new(append_to(Path::new(path))?))),
            None => Ok(Self::Stdout),
        }
    }

    /// Write one line; a poisoned lock or failed write drops the line
    pub fn write_line(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::File(file) => {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{line}");
                }
            }
        }
    }
}

fn append_to(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the process-wide sink. Fails if called twice.
pub fn init(access_log_file: Option<&str>) -> io::Result<()> {
    ACCESS_SINK
        .set(AccessSink::open(access_log_file)?)
        .map_err(|_| io::Error::new(io::ErrorKind::AlreadyExists, "access log already initialized"))
}

pub fn get() -> Option<&'static AccessSink> {
    ACCESS_SINK.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/access.log");
        let path_str = path.to_str().unwrap();

        let sink = AccessSink::open(Some(path_str)).unwrap();
        sink.write_line("GET /api/v1.0/stations 200");
        sink.write_line("GET /api/v1.0/tobs 200");

        let reopened = AccessSink::open(Some(path_str)).unwrap();
        reopened.write_line("GET /nope 404");

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "GET /api/v1.0/stations 200\nGET /api/v1.0/tobs 200\nGET /nope 404\n"
        );
    }

    #[test]
    fn test_missing_parent_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.log");
        append_to(&path).unwrap();
        assert!(path.is_file());
    }
}
