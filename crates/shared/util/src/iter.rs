//! Iterators that own a resource.
//!
//! A [`CloseableIterator`] yields elements like any [`Iterator`] and additionally
//! owns something that must be released (a file handle, a cursor, a lease).
//! Whoever holds the iterator owns the resource until [`CloseableIterator::close`]
//! is called. [`CloseOnDrop`] guarantees the release on every exit path.

use crate::error::{UtilError, UtilErrorExt};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use tracing::{debug, trace, warn};

/// An iterator over a resource that must be released exactly once.
pub trait CloseableIterator: Iterator {
    /// Releases the underlying resource.
    ///
    /// After a successful or failed `close`, the iterator yields no further
    /// elements. Closing an already closed iterator is a no-op returning `Ok(())`.
    ///
    /// # Errors
    /// Returns [`UtilError::Release`] (or [`UtilError::Io`]) when releasing fails.
    fn close(&mut self) -> Result<(), UtilError>;

    /// Returns `true` once [`CloseableIterator::close`] has run.
    fn is_closed(&self) -> bool;
}

/// Extension methods for every [`CloseableIterator`].
pub trait CloseableIteratorExt: CloseableIterator + Sized {
    /// Wraps the iterator in a guard that closes it when dropped.
    fn close_on_drop(self) -> CloseOnDrop<Self> {
        CloseOnDrop { inner: self }
    }
}

impl<I: CloseableIterator> CloseableIteratorExt for I {}

/// Scoped-release guard: closes the wrapped iterator on drop unless already closed.
///
/// Failures while closing from `Drop` are logged, never panicked.
#[must_use = "Dropping the guard immediately releases the resource."]
#[derive(Debug)]
pub struct CloseOnDrop<I: CloseableIterator> {
    inner: I,
}

impl<I: CloseableIterator> CloseOnDrop<I> {
    /// Closes the iterator now, surfacing any release error.
    ///
    /// # Errors
    /// Propagates the error from [`CloseableIterator::close`].
    pub fn close(mut self) -> Result<(), UtilError> {
        self.inner.close()
    }

    #[must_use]
    pub const fn get_ref(&self) -> &I {
        &self.inner
    }
}

impl<I: CloseableIterator> Iterator for CloseOnDrop<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: CloseableIterator> Drop for CloseOnDrop<I> {
    fn drop(&mut self) {
        if self.inner.is_closed() {
            return;
        }
        match self.inner.close() {
            Ok(()) => trace!(iterator = std::any::type_name::<I>(), "Released on drop"),
            Err(err) => warn!(
                iterator = std::any::type_name::<I>(),
                error = %err,
                "Failed to release iterator resource on drop"
            ),
        }
    }
}

/// Adapts any iterator plus a release closure into a [`CloseableIterator`].
///
/// The closure runs at most once, even if it fails.
pub struct ReleasingIter<I, F> {
    iter: Option<I>,
    release: Option<F>,
}

/// Creates a [`ReleasingIter`] from an iterator and its release action.
pub fn releasing<I, F>(iter: I, release: F) -> ReleasingIter<I::IntoIter, F>
where
    I: IntoIterator,
    F: FnOnce() -> Result<(), UtilError>,
{
    ReleasingIter { iter: Some(iter.into_iter()), release: Some(release) }
}

impl<I, F> fmt::Debug for ReleasingIter<I, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleasingIter")
            .field("closed", &self.release.is_none())
            .finish_non_exhaustive()
    }
}

impl<I: Iterator, F> Iterator for ReleasingIter<I, F> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl<I, F> CloseableIterator for ReleasingIter<I, F>
where
    I: Iterator,
    F: FnOnce() -> Result<(), UtilError>,
{
    fn close(&mut self) -> Result<(), UtilError> {
        self.iter = None;
        self.release.take().map_or(Ok(()), |release| release())
    }

    fn is_closed(&self) -> bool {
        self.release.is_none()
    }
}

/// In-memory closeable iterator. Closing only discards the remaining elements.
#[derive(Debug, Clone)]
pub struct VecCloseableIterator<T> {
    items: std::vec::IntoIter<T>,
    closed: bool,
}

impl<T> From<Vec<T>> for VecCloseableIterator<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items: items.into_iter(), closed: false }
    }
}

impl<T> FromIterator<T> for VecCloseableIterator<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Iterator for VecCloseableIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.closed { None } else { self.items.next() }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.closed { (0, Some(0)) } else { self.items.size_hint() }
    }
}

impl<T> CloseableIterator for VecCloseableIterator<T> {
    fn close(&mut self) -> Result<(), UtilError> {
        self.closed = true;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Closeable iterator over the text lines of a reader.
///
/// Closing drops the reader, which for [`LineReader::open`] releases the file handle.
#[derive(Debug)]
pub struct LineReader<R> {
    lines: Option<Lines<R>>,
    line: u64,
}

impl LineReader<BufReader<File>> {
    /// Opens `path` for line-by-line reading.
    ///
    /// # Errors
    /// Returns [`UtilError::Io`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UtilError> {
        let path = path.as_ref();
        let file = File::open(path).context(format!("Opening {}", path.display()))?;
        debug!(path = %path.display(), "Opened line reader");
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: Some(reader.lines()), line: 0 }
    }

    /// Number of lines yielded so far.
    #[must_use]
    pub const fn line_number(&self) -> u64 {
        self.line
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = Result<String, UtilError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.lines.as_mut()?.next()?;
        self.line += 1;
        let line = self.line;
        Some(next.map_err(|source| UtilError::Io {
            source,
            context: Some(format!("Reading line {line}").into()),
        }))
    }
}

impl<R: BufRead> CloseableIterator for LineReader<R> {
    fn close(&mut self) -> Result<(), UtilError> {
        if self.lines.take().is_some() {
            trace!(lines = self.line, "Closed line reader");
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.lines.is_none()
    }
}
