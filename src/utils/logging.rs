use crate::error::{InstallerError, Result};
use crate::utils::fs;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Routes `log` records to `log_file`, appending one timestamped line per
/// record. Console output is left to the callers.
pub fn init(log_file: &Path) -> Result<()> {
    fs::ensure_parent_dir(log_file)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}",
                format_line(&chrono::Local::now(), record.level(), message)
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(fern::log_file(log_file)?)
        .apply()
        .map_err(|e| InstallerError::config_error(format!("logger already set: {e}")))?;

    Ok(())
}

fn format_line<Tz>(
    now: &chrono::DateTime<Tz>,
    level: log::Level,
    message: &std::fmt::Arguments<'_>,
) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] [{level}] {message}", now.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let line = format_line(&now, log::Level::Info, &format_args!("Download successful"));
        assert_eq!(line, "[2024-03-09 07:05:01] [INFO] Download successful");
    }
}
