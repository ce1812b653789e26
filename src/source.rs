//! Byte sources the reader can be layered over.
//!
//! A source is anything `Read`, plus the knowledge of whether it can jump to
//! an absolute position. The reader uses that to decide how to skip data.

use std::io::{self, Read, Seek, SeekFrom};

/// Bytes for an [`NbtReader`][`crate::NbtReader`] to consume.
///
/// Bulk reads come from [`Read::read`], which may return fewer bytes than
/// asked for. Sources that return `true` from [`can_seek`][`Source::can_seek`]
/// must support [`position`][`Source::position`] and
/// [`set_position`][`Source::set_position`].
pub trait Source: Read {
    /// Whether this source supports random access.
    fn can_seek(&self) -> bool;

    /// The current absolute offset into the source.
    fn position(&mut self) -> io::Result<u64>;

    /// Move to an absolute offset. Moving beyond the end is allowed, the next
    /// read will simply hit the end.
    fn set_position(&mut self, pos: u64) -> io::Result<()>;
}

fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "source does not support random access",
    )
}

/// Random access source, for anything that is `Read + Seek`.
#[derive(Debug)]
pub struct Seekable<R> {
    inner: R,
}

impl<R: Read + Seek> Seekable<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Seekable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> Source for Seekable<R> {
    fn can_seek(&self) -> bool {
        true
    }

    fn position(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    fn set_position(&mut self, pos: u64) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(())
    }
}

/// Forward-only source, for anything that is just `Read`. Even if the inner
/// type could seek, this source will not.
#[derive(Debug)]
pub struct Sequential<R> {
    inner: R,
}

impl<R: Read> Sequential<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Sequential<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read> Source for Sequential<R> {
    fn can_seek(&self) -> bool {
        false
    }

    fn position(&mut self) -> io::Result<u64> {
        Err(unsupported())
    }

    fn set_position(&mut self, _pos: u64) -> io::Result<()> {
        Err(unsupported())
    }
}

impl<'a> Source for &'a [u8] {
    fn can_seek(&self) -> bool {
        false
    }

    fn position(&mut self) -> io::Result<u64> {
        Err(unsupported())
    }

    fn set_position(&mut self, _pos: u64) -> io::Result<()> {
        Err(unsupported())
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn can_seek(&self) -> bool {
        (**self).can_seek()
    }

    fn position(&mut self) -> io::Result<u64> {
        (**self).position()
    }

    fn set_position(&mut self, pos: u64) -> io::Result<()> {
        (**self).set_position(pos)
    }
}
