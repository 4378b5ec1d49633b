//! Tracing setup: human-readable stdout output plus a size-rotated file that
//! only receives ERROR records.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::config::AppConfig;

/// Default error log, matching `ERROR_LOG_PATH`'s default.
pub const DEFAULT_ERROR_LOG: &str = ".program.log";

const DEFAULT_FILTER: &str =
    "review_relay=info,relay_poller=info,relay_engine=info,relay_notifier=info";

/// Size-bounded log file rolled as `path -> path.1 -> ... -> path.N`.
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            backups,
            file,
            written,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backups == 0 {
            self.file = File::create(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A record larger than the limit still goes into a fresh file.
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Where ERROR records are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub error_log_path: PathBuf,
    pub error_log_max_bytes: u64,
    pub error_log_backups: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            error_log_path: PathBuf::from(DEFAULT_ERROR_LOG),
            error_log_max_bytes: 50_000_000,
            error_log_backups: 5,
        }
    }
}

impl From<&AppConfig> for LogSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            error_log_path: config.error_log_path.clone(),
            error_log_max_bytes: config.error_log_max_bytes,
            error_log_backups: config.error_log_backups,
        }
    }
}

/// Build the subscriber: stdout filtered by `RUST_LOG`, plus the rotating
/// error file restricted to ERROR records.
pub fn build_subscriber(settings: &LogSettings) -> io::Result<Box<dyn Subscriber + Send + Sync>> {
    let error_file = RotatingFileWriter::open(
        &settings.error_log_path,
        settings.error_log_max_bytes,
        settings.error_log_backups,
    )?;

    let stdout = fmt::layer().with_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    );
    let errors = fmt::layer()
        .with_ansi(false)
        .with_line_number(true)
        .with_writer(Mutex::new(error_file))
        .with_filter(LevelFilter::ERROR);

    Ok(Box::new(tracing_subscriber::registry().with(stdout).with(errors)))
}

/// Install [`build_subscriber`] as the global default.
pub fn init_tracing(settings: &LogSettings) -> io::Result<()> {
    // Ignore the error if a subscriber is already set (tests, repeated init).
    let _ = build_subscriber(settings)?.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_appends_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.log");
        let mut writer = RotatingFileWriter::open(&path, 1024, 2).unwrap();

        writer.write_all(b"first\n").unwrap();
        writer.write_all(b"second\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        assert!(!writer.backup_path(1).exists());
    }

    #[test]
    fn test_writer_rotates_and_bounds_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.log");
        let mut writer = RotatingFileWriter::open(&path, 10, 2).unwrap();

        for line in ["aaaaaaaa\n", "bbbbbbbb\n", "cccccccc\n", "dddddddd\n"] {
            writer.write_all(line.as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "dddddddd\n");
        assert_eq!(
            fs::read_to_string(writer.backup_path(1)).unwrap(),
            "cccccccc\n"
        );
        assert_eq!(
            fs::read_to_string(writer.backup_path(2)).unwrap(),
            "bbbbbbbb\n"
        );
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn test_error_file_receives_only_error_records() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            error_log_path: dir.path().join("errors.log"),
            error_log_max_bytes: 1024 * 1024,
            error_log_backups: 1,
        };

        let subscriber = build_subscriber(&settings).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("requesting homework statuses");
            tracing::info!("poll cycle started");
            tracing::warn!("slow response");
            tracing::error!(severity = "critical", "credentials missing");
        });

        let contents = fs::read_to_string(&settings.error_log_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1, "{contents}");
        assert!(lines[0].contains("ERROR"));
        assert!(lines[0].contains("credentials missing"));
        assert!(lines[0].contains("severity=\"critical\""));
        assert!(!contents.contains("poll cycle started"));
        assert!(!contents.contains("slow response"));
    }

    #[test]
    fn test_writer_resumes_existing_file_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.log");
        fs::write(&path, "0123456789").unwrap();

        let mut writer = RotatingFileWriter::open(&path, 12, 1).unwrap();
        writer.write_all(b"xyz").unwrap();
        writer.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "xyz");
        assert_eq!(
            fs::read_to_string(writer.backup_path(1)).unwrap(),
            "0123456789"
        );
    }
}
