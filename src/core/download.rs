use crate::core::artifacts::TempArchive;
use crate::error::{InstallerError, Result};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

/// Bytes read from the response per iteration.
pub const CHUNK_SIZE: usize = 4096;

/// A progress line is printed each time another this many bytes arrive.
pub const PROGRESS_INTERVAL: u64 = 100 * 1024;

pub struct Downloader {
    client: Client,
}

impl Downloader {
    /// `timeout` of `None` blocks until the transfer completes or fails.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("termui-installer/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| InstallerError::download_error("", e.to_string()))?;
        Ok(Self { client })
    }

    /// Streams `url` into `destination`. The returned guard owns the file; on
    /// any error the partially written file is removed before returning.
    pub fn download(&self, url: &str, destination: &Path) -> Result<TempArchive> {
        log::info!("Attempting to download from: {url}");
        let archive = TempArchive::claim(destination)?;

        let mut response = self.client.get(url).send().map_err(|e| {
            log::error!("Failed to connect to {url}: {e}");
            InstallerError::download_error(url, e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            log::error!("Server answered {status} for {url}");
            return Err(InstallerError::download_error(
                url,
                format!("server answered {status}"),
            ));
        }

        let file = File::create(archive.path())?;
        let mut writer = BufWriter::new(file);
        let total = copy_with_progress(&mut response, &mut writer, |bytes| {
            print!("\r  Downloaded: {} KB", bytes / 1024);
            std::io::stdout().flush()
        })
        .map_err(|e| {
            println!();
            log::error!("Transfer from {url} interrupted: {e}");
            InstallerError::download_error(url, e.to_string())
        })?;
        writer.flush()?;

        println!("\r  Downloaded: {} KB", total / 1024);
        log::info!("Downloaded {total} bytes");

        if total == 0 {
            log::error!("Download from {url} received no data");
            return Err(InstallerError::EmptyDownload {
                url: url.to_string(),
            });
        }

        Ok(archive)
    }
}

/// Copies `reader` into `writer` in [`CHUNK_SIZE`] chunks, calling `progress`
/// with the running total every time a [`PROGRESS_INTERVAL`] boundary is
/// crossed. Returns the number of bytes copied; an error from `progress`
/// aborts the copy.
pub fn copy_with_progress<R, W, F>(reader: &mut R, writer: &mut W, mut progress: F) -> std::io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
    F: FnMut(u64) -> std::io::Result<()>,
{
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut total: u64 = 0;
    let mut next_mark = PROGRESS_INTERVAL;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer[..read])?;
        total += read as u64;

        if total >= next_mark {
            progress(total)?;
            next_mark = (total / PROGRESS_INTERVAL + 1) * PROGRESS_INTERVAL;
        }
    }

    Ok(total)
}
