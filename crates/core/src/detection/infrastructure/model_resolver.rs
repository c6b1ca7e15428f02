use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("download failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("model file error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`; `total_bytes`
/// is 0 when the server sent no Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Locates model files by name, downloading into the cache on a miss.
///
/// Lookup order per model: cache directory, then the optional bundled
/// directory, then a download written to the cache.
pub struct ModelResolver {
    cache_dir: PathBuf,
    bundled_dir: Option<PathBuf>,
    progress: Option<ProgressFn>,
}

impl ModelResolver {
    /// Resolver over the platform cache directory.
    pub fn new() -> Result<Self, ModelResolveError> {
        Ok(Self::with_cache_dir(default_cache_dir()?))
    }

    pub fn with_cache_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            bundled_dir: None,
            progress: None,
        }
    }

    /// Directory searched before any download is attempted
    /// (development checkouts, pre-packaged installs).
    pub fn bundled_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.bundled_dir = dir;
        self
    }

    pub fn on_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn resolve(&self, name: &str, url: &str) -> Result<PathBuf, ModelResolveError> {
        let cached = self.cache_dir.join(name);
        if cached.exists() {
            return Ok(cached);
        }

        if let Some(bundled) = self.bundled_dir.as_ref().map(|dir| dir.join(name)) {
            if bundled.exists() {
                return Ok(bundled);
            }
        }

        fs::create_dir_all(&self.cache_dir).map_err(|e| io_err(&self.cache_dir, e))?;
        self.download(url, &cached)?;
        Ok(cached)
    }

    /// Downloads into a `.part` staging file and renames on success, so a
    /// failed transfer never leaves a truncated model in the cache.
    fn download(&self, url: &str, dest: &Path) -> Result<(), ModelResolveError> {
        let staging = dest.with_extension("part");

        match self.fetch(url, &staging) {
            Ok(()) => fs::rename(&staging, dest).map_err(|e| io_err(dest, e)),
            Err(e) => {
                let _ = fs::remove_file(&staging);
                Err(e)
            }
        }
    }

    fn fetch(&self, url: &str, staging: &Path) -> Result<(), ModelResolveError> {
        let mut response = reqwest::blocking::get(url)
            .and_then(|r| r.error_for_status())
            .map_err(|source| ModelResolveError::Http {
                url: url.to_string(),
                source,
            })?;
        let total = response.content_length().unwrap_or(0);

        let file = fs::File::create(staging).map_err(|e| io_err(staging, e))?;
        let mut sink = ProgressWriter {
            inner: file,
            written: 0,
            total,
            progress: self.progress.as_deref(),
        };

        // Streamed copy; models can run to hundreds of megabytes
        io::copy(&mut response, &mut sink).map_err(|e| io_err(staging, e))?;
        sink.flush().map_err(|e| io_err(staging, e))
    }
}

/// Platform cache for downloaded models.
///
/// macOS uses the application-support directory; elsewhere the user cache
/// directory (`$XDG_CACHE_HOME` on Linux, `%LOCALAPPDATA%` on Windows).
fn default_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "macos"))]
    let base = dirs::cache_dir();

    base.map(|d| d.join("FaceAttr").join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

fn io_err(path: &Path, source: io::Error) -> ModelResolveError {
    ModelResolveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writer that reports cumulative byte counts to a progress callback.
struct ProgressWriter<'a, W: Write> {
    inner: W,
    written: u64,
    total: u64,
    progress: Option<&'a (dyn Fn(u64, u64) + Send)>,
}

impl<W: Write> Write for ProgressWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        if let Some(cb) = self.progress {
            cb(self.written, self.total);
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
