//! Image probing: is an image reference loadable?
//!
//! A probe answers one question for the gallery builder and never fails loudly:
//! any problem with a reference (missing file, garbage bytes, a path that
//! escapes the content root) just means "not loadable". The reason is kept as
//! a [`ProbeFailure`] so the CLI can report it, but callers that only need the
//! answer use [`ImageProbe::probe`].
//!
//! | Reference | Check |
//! |---|---|
//! | `images/a.png`, `/images/a%20b.png` | file inside the content root and non-zero header size |
//! | `*.avif` | container metadata via `avif-parse` |
//! | `http://`, `https://`, `//`, `data:` | no network access: accepted iff `trust_remote` |
//!
//! Probes can hang in principle (slow network filesystems), so
//! [`BoundedProbe`] caps each check with a timeout and counts expiry as
//! failure.

use image::ImageReader;
use percent_encoding::percent_decode_str;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;
use thiserror::Error;

/// Why a reference was not loadable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeFailure {
    #[error("empty image reference")]
    Empty,
    #[error("remote images are not trusted")]
    RemoteRejected,
    #[error("path escapes the content root")]
    OutsideRoot,
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("not a decodable image: {0}")]
    Undecodable(String),
    #[error("no answer within {0:?}")]
    TimedOut(Duration),
    #[error("probe aborted")]
    Aborted,
}

/// Progress events emitted while probing, consumed by [`crate::output`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeEvent {
    Testing { src: String },
    Loaded { src: String },
    Failed { src: String, reason: ProbeFailure },
}

/// Loadability check for image references.
///
/// `Sync` so a single probe can be shared across rayon workers.
pub trait ImageProbe: Sync {
    /// Check a reference, returning the reason when it is not loadable.
    fn check(&self, src: &str) -> Result<(), ProbeFailure>;

    /// `true` iff the reference is loadable.
    fn probe(&self, src: &str) -> bool {
        self.check(src).is_ok()
    }
}

impl<P: ImageProbe + Send + ?Sized> ImageProbe for Arc<P> {
    fn check(&self, src: &str) -> Result<(), ProbeFailure> {
        (**self).check(src)
    }
}

impl<P: ImageProbe + ?Sized> ImageProbe for Box<P> {
    fn check(&self, src: &str) -> Result<(), ProbeFailure> {
        (**self).check(src)
    }
}

/// Probe and report the outcome over an optional event channel.
pub fn probe_reported<P: ImageProbe + ?Sized>(
    probe: &P,
    src: &str,
    events: Option<&mpsc::Sender<ProbeEvent>>,
) -> bool {
    let send = |event: ProbeEvent| {
        if let Some(tx) = events {
            // A dropped receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    };
    send(ProbeEvent::Testing {
        src: src.to_string(),
    });
    match probe.check(src) {
        Ok(()) => {
            send(ProbeEvent::Loaded {
                src: src.to_string(),
            });
            true
        }
        Err(reason) => {
            send(ProbeEvent::Failed {
                src: src.to_string(),
                reason,
            });
            false
        }
    }
}

/// Whether a reference points off the local filesystem.
pub fn is_remote(src: &str) -> bool {
    let lower = src.trim_start().to_ascii_lowercase();
    ["http://", "https://", "//", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// Turn a local reference into a path relative to the content root.
///
/// Query strings and fragments are dropped, `%XX` escapes are decoded, a
/// leading `/` means "content root", `.` components are removed and `..`
/// components are refused. Two spellings of the same file map to the same
/// path.
pub fn local_path(src: &str) -> Result<PathBuf, ProbeFailure> {
    let without_suffix = src.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(without_suffix)
        .decode_utf8()
        .map_err(|e| ProbeFailure::Undecodable(format!("{src}: {e}")))?;
    let relative = decoded.trim().trim_start_matches('/');

    let mut path = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return Err(ProbeFailure::OutsideRoot),
        }
    }
    if path.as_os_str().is_empty() {
        return Err(ProbeFailure::Empty);
    }
    Ok(path)
}

/// Filesystem-backed probe rooted at the content directory.
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
    trust_remote: bool,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>, trust_remote: bool) -> Self {
        Self {
            root: root.into(),
            trust_remote,
        }
    }
}

impl ImageProbe for FsProbe {
    fn check(&self, src: &str) -> Result<(), ProbeFailure> {
        if src.trim().is_empty() {
            return Err(ProbeFailure::Empty);
        }
        if is_remote(src) {
            return if self.trust_remote {
                Ok(())
            } else {
                Err(ProbeFailure::RemoteRejected)
            };
        }
        let path = self.root.join(local_path(src)?);
        if !path.is_file() {
            return Err(ProbeFailure::NotFound(path));
        }
        // Symlinks are followed only while they stay inside the root.
        let root = self
            .root
            .canonicalize()
            .map_err(|_| ProbeFailure::NotFound(self.root.clone()))?;
        let resolved = path
            .canonicalize()
            .map_err(|_| ProbeFailure::NotFound(path.clone()))?;
        if !resolved.starts_with(&root) {
            return Err(ProbeFailure::OutsideRoot);
        }
        let (width, height) = read_dimensions(&path)?;
        if width == 0 || height == 0 {
            return Err(ProbeFailure::Undecodable(format!(
                "{} has zero dimensions",
                path.display()
            )));
        }
        Ok(())
    }
}

fn is_avif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("avif"))
}

fn undecodable(path: &Path, err: impl std::fmt::Debug) -> ProbeFailure {
    ProbeFailure::Undecodable(format!("{}: {err:?}", path.display()))
}

/// Read image dimensions from the header only; pixel data is never decoded.
fn read_dimensions(path: &Path) -> Result<(u32, u32), ProbeFailure> {
    if is_avif(path) {
        let file = std::fs::File::open(path).map_err(|e| undecodable(path, e))?;
        let avif =
            avif_parse::read_avif(&mut BufReader::new(file)).map_err(|e| undecodable(path, e))?;
        let meta = avif
            .primary_item_metadata()
            .map_err(|e| undecodable(path, e))?;
        return Ok((meta.max_frame_width.get(), meta.max_frame_height.get()));
    }
    ImageReader::open(path)
        .map_err(|e| undecodable(path, e))?
        .with_guessed_format()
        .map_err(|e| undecodable(path, e))?
        .into_dimensions()
        .map_err(|e| undecodable(path, e))
}

/// Caps another probe with a timeout.
///
/// Each check runs on its own thread; when the deadline passes the answer is
/// "not loadable" and the stray thread is left to finish on its own.
pub struct BoundedProbe<P> {
    inner: Arc<P>,
    timeout: Duration,
}

impl<P: ImageProbe + Send + 'static> BoundedProbe<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }
}

impl<P: ImageProbe + Send + 'static> ImageProbe for BoundedProbe<P> {
    fn check(&self, src: &str) -> Result<(), ProbeFailure> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let src = src.to_string();
        std::thread::spawn(move || {
            let _ = tx.send(inner.check(&src));
        });
        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(ProbeFailure::TimedOut(self.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ProbeFailure::Aborted),
        }
    }
}
