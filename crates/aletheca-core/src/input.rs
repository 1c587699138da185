//! Local input files: glob expansion, format detection, gzip-aware readers.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flate2::read::MultiGzDecoder;

/// Buffer size for input readers (256KB)
const INPUT_BUF_SIZE: usize = 256 * 1024;

/// Error types for input discovery and opening
#[derive(Debug)]
pub enum InputError {
    /// Malformed glob pattern
    Pattern { pattern: String, message: String },
    /// Glob pattern matched no files
    NoMatch(String),
    /// I/O error on a specific path
    Io { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern { pattern, message } => {
                write!(f, "invalid pattern {pattern:?}: {message}")
            }
            Self::NoMatch(pattern) => write!(f, "no files match {pattern:?}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl InputError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// How records are laid out in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// One JSON document (object or array)
    Json,
    /// One JSON object per line
    JsonLines,
}

/// A local file to read, with its detected layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub format: InputFormat,
    pub compressed: bool,
}

impl InputFile {
    /// Detect layout from the file name.
    ///
    /// `.gz` is stripped first; a bare `.gz` (snapshot part files) is JSON lines.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let (inner, compressed) = match name.strip_suffix(".gz") {
            Some(inner) => (inner.to_string(), true),
            None => (name, false),
        };
        let format = if inner.ends_with(".json") {
            InputFormat::Json
        } else if inner.ends_with(".jsonl") || inner.ends_with(".ndjson") || compressed {
            InputFormat::JsonLines
        } else {
            InputFormat::Json
        };
        Self {
            path,
            format,
            compressed,
        }
    }

    /// File size on disk, if known
    pub fn size(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Open a buffered reader, decompressing when needed.
    ///
    /// The counter tracks bytes read from disk (compressed bytes for `.gz`).
    pub fn open(&self) -> Result<(Box<dyn BufRead + Send>, ByteCounter), InputError> {
        let file = File::open(&self.path).map_err(|e| InputError::io(&self.path, e))?;
        let counter = ByteCounter::default();
        let counting = CountingReader::new(file, counter.clone());
        let reader: Box<dyn BufRead + Send> = if self.compressed {
            Box::new(BufReader::with_capacity(
                INPUT_BUF_SIZE,
                MultiGzDecoder::new(counting),
            ))
        } else {
            Box::new(BufReader::with_capacity(INPUT_BUF_SIZE, counting))
        };
        Ok((reader, counter))
    }

    /// Read the whole (decompressed) file into memory.
    pub fn read_to_string(&self) -> Result<String, InputError> {
        let (mut reader, _) = self.open()?;
        let mut buf = String::new();
        reader
            .read_to_string(&mut buf)
            .map_err(|e| InputError::io(&self.path, e))?;
        Ok(buf)
    }

    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Shared byte counter for progress tracking
pub type ByteCounter = Arc<AtomicU64>;

/// Reader wrapper that tracks bytes read
pub struct CountingReader<R> {
    inner: R,
    count: ByteCounter,
}

impl<R> CountingReader<R> {
    pub fn new(inner: R, count: ByteCounter) -> Self {
        Self { inner, count }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}

fn is_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Expand paths and glob patterns into input files.
///
/// Plain paths must exist; patterns must match at least one file. Matches of
/// one pattern are sorted, and a file named twice is kept once.
pub fn expand_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<InputFile>, InputError> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if !is_pattern(input) {
            let path = PathBuf::from(input);
            std::fs::metadata(&path).map_err(|e| InputError::io(&path, e))?;
            paths.push(path);
            continue;
        }

        let mut matched: Vec<PathBuf> = glob::glob(input)
            .map_err(|e| InputError::Pattern {
                pattern: input.to_string(),
                message: e.to_string(),
            })?
            .filter_map(|e| e.ok())
            .filter(|p| p.is_file())
            .collect();
        if matched.is_empty() {
            return Err(InputError::NoMatch(input.to_string()));
        }
        matched.sort();
        log::debug!("{input}: {} files", matched.len());
        paths.extend(matched);
    }

    let mut seen = std::collections::HashSet::new();
    paths.retain(|p| seen.insert(p.clone()));
    Ok(paths.into_iter().map(InputFile::from_path).collect())
}
