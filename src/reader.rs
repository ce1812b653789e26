use std::borrow::Cow;
use std::io::{self, Read, Seek};

use byteorder::ByteOrder as _;
use byteorder::{NativeEndian, ReadBytesExt};
use log::{debug, trace, warn};

use crate::{
    error::{Error, Result},
    source::{Seekable, Sequential, Source},
    ByteOrder, ReaderOptions, StringPolicy, Tag, TagSelector,
};

/// Strings shorter than this are decoded without allocating a buffer.
pub const STRING_BUFFER_SIZE: usize = 64;

/// Chunk size used when skipping on a source that cannot seek.
pub const SKIP_BUFFER_SIZE: usize = 8 * 1024;

/// Deepest nesting of lists and compounds [`NbtReader::skip_payload`] will
/// walk through before giving up.
pub const MAX_DEPTH: usize = 512;

/// A list or compound part way through being skipped.
enum Layer {
    /// Element type and how many elements are left.
    List(Tag, usize),
    Compound,
}

/// Reads NBT primitives from a [`Source`] in a fixed byte order.
///
/// Whether bytes need swapping is worked out once, when the reader is
/// created, by comparing the stream's byte order with the machine's. Each
/// multi-byte read then reads in native order and swaps if needed.
///
/// Every read advances the source, including reads that fail. A failed tag
/// read has still consumed the tag byte, and a string with a negative length
/// has still consumed the length.
///
/// # Examples
///
/// Bedrock Edition data is little endian:
///
/// ```
/// use nbtreader::{ByteOrder, NbtReader};
/// use std::io::Cursor;
///
/// # fn main() -> nbtreader::error::Result<()> {
/// let data = vec![0x2a, 0, 0, 0, 2, 0, b'h', b'i'];
/// let mut reader = NbtReader::seekable(Cursor::new(data), ByteOrder::LittleEndian);
///
/// assert_eq!(reader.read_i32()?, 42);
/// assert_eq!(reader.read_string()?, "hi");
/// # Ok(())
/// # }
/// ```
pub struct NbtReader<S> {
    source: S,
    opts: ReaderOptions,
    swap_needed: bool,

    // Scratch space. Nothing in these outlives a single call.
    float_buf: [u8; 4],
    double_buf: [u8; 8],
    string_buf: [u8; STRING_BUFFER_SIZE],
    skip_buf: Option<Box<[u8]>>,

    selector: Option<Box<dyn TagSelector>>,
}

impl<S> std::fmt::Debug for NbtReader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NbtReader")
            .field("opts", &self.opts)
            .field("swap_needed", &self.swap_needed)
            .field("has_selector", &self.selector.is_some())
            .finish()
    }
}

impl<R: Read + Seek> NbtReader<Seekable<R>> {
    /// Create a reader over something that can seek. Skips will seek rather
    /// than read.
    pub fn seekable(inner: R, order: ByteOrder) -> Self {
        Self::with_options(Seekable::new(inner), ReaderOptions::new().byte_order(order))
    }
}

impl<R: Read> NbtReader<Sequential<R>> {
    /// Create a reader over something that can only be read forwards. Skips
    /// will read and discard.
    pub fn sequential(inner: R, order: ByteOrder) -> Self {
        Self::with_options(Sequential::new(inner), ReaderOptions::new().byte_order(order))
    }
}

impl<S: Source> NbtReader<S> {
    /// Create a reader for a stream that is big endian if `big_endian`,
    /// little endian otherwise.
    pub fn new(source: S, big_endian: bool) -> Self {
        let opts = ReaderOptions::new().byte_order(ByteOrder::from_big_endian(big_endian));
        Self::with_options(source, opts)
    }

    /// Create a reader with full control over the options.
    pub fn with_options(source: S, opts: ReaderOptions) -> Self {
        let swap_needed = opts.byte_order != ByteOrder::native();
        debug!(
            "reading {:?} nbt, swap needed: {}, seekable source: {}",
            opts.byte_order,
            swap_needed,
            source.can_seek()
        );

        Self {
            source,
            opts,
            swap_needed,
            float_buf: [0; 4],
            double_buf: [0; 8],
            string_buf: [0; STRING_BUFFER_SIZE],
            skip_buf: None,
            selector: None,
        }
    }

    /// The options this reader was created with.
    pub fn options(&self) -> &ReaderOptions {
        &self.opts
    }

    /// Byte order of the stream being read.
    pub fn byte_order(&self) -> ByteOrder {
        self.opts.byte_order
    }

    /// Whether the stream's byte order differs from this machine's.
    pub fn swap_needed(&self) -> bool {
        self.swap_needed
    }

    /// Read a tag type. The byte is consumed even if it is not a valid tag.
    pub fn read_tag(&mut self) -> Result<Tag> {
        let tag = self.read_u8()?;
        Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
    }

    /// Read a single unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.source.read_u8()?)
    }

    /// Read a single signed byte, the payload of [`Tag::Byte`].
    pub fn read_byte(&mut self) -> Result<i8> {
        Ok(self.source.read_i8()?)
    }

    /// Read an i16 in the stream's byte order.
    pub fn read_i16(&mut self) -> Result<i16> {
        let v = self.source.read_i16::<NativeEndian>()?;
        Ok(if self.swap_needed { v.swap_bytes() } else { v })
    }

    /// Read an i32 in the stream's byte order.
    pub fn read_i32(&mut self) -> Result<i32> {
        let v = self.source.read_i32::<NativeEndian>()?;
        Ok(if self.swap_needed { v.swap_bytes() } else { v })
    }

    /// Read an i64 in the stream's byte order.
    pub fn read_i64(&mut self) -> Result<i64> {
        let v = self.source.read_i64::<NativeEndian>()?;
        Ok(if self.swap_needed { v.swap_bytes() } else { v })
    }

    /// Read an f32. Swapping happens on the raw bytes, so the exact bit
    /// pattern is preserved, NaN payloads included.
    pub fn read_f32(&mut self) -> Result<f32> {
        if self.swap_needed {
            self.source.read_exact(&mut self.float_buf)?;
            self.float_buf.reverse();
            Ok(NativeEndian::read_f32(&self.float_buf))
        } else {
            Ok(self.source.read_f32::<NativeEndian>()?)
        }
    }

    /// Read an f64. See [`read_f32`][`Self::read_f32`].
    pub fn read_f64(&mut self) -> Result<f64> {
        if self.swap_needed {
            self.source.read_exact(&mut self.double_buf)?;
            self.double_buf.reverse();
            Ok(NativeEndian::read_f64(&self.double_buf))
        } else {
            Ok(self.source.read_f64::<NativeEndian>()?)
        }
    }

    /// Read a string prefixed with its length in bytes as an i16. How
    /// invalid text is handled depends on the [`StringPolicy`] in the
    /// options.
    ///
    /// A negative length is an error, and no more than the length is
    /// consumed in that case.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_str_len()?;

        if len < STRING_BUFFER_SIZE {
            let buf = &mut self.string_buf[..len];
            self.source.read_exact(buf)?;
            decode_str(self.opts.strings, buf)
        } else {
            let mut buf = vec![0; len];
            self.source.read_exact(&mut buf)?;
            decode_string(self.opts.strings, buf)
        }
    }

    /// Skip `count` bytes. Seekable sources seek, other sources are read
    /// until enough bytes have gone by.
    pub fn skip(&mut self, count: i32) -> Result<()> {
        let count = usize::try_from(count).map_err(|_| {
            Error::invalid_argument(format!("cannot skip a negative number of bytes: {}", count))
        })?;
        self.skip_bytes(count)
    }

    /// Skip a length-prefixed string without decoding it.
    pub fn skip_string(&mut self) -> Result<()> {
        let len = self.read_str_len()?;
        self.skip_bytes(len)
    }

    /// Skip the payload of a tag whose type has already been read. For
    /// compounds this skips everything up to and including the matching end
    /// tag. Skipping the payload of [`Tag::End`] does nothing, it has none.
    ///
    /// ```
    /// use nbtreader::{ByteOrder, NbtReader, Tag};
    ///
    /// # fn main() -> nbtreader::error::Result<()> {
    /// // List of two shorts, then a byte.
    /// let data = [2u8, 0, 0, 0, 2, 0, 1, 0, 2, 42];
    /// let mut reader = NbtReader::sequential(&data[..], ByteOrder::BigEndian);
    ///
    /// reader.skip_payload(Tag::List)?;
    /// assert_eq!(reader.read_byte()?, 42);
    /// # Ok(())
    /// # }
    /// ```
    pub fn skip_payload(&mut self, tag: Tag) -> Result<()> {
        // Lists and compounds still being skipped, innermost last.
        let mut layers = Vec::new();
        let mut next = Some(tag);

        loop {
            if let Some(tag) = next.take() {
                match tag {
                    Tag::End => {}
                    Tag::Byte => self.skip_bytes(1)?,
                    Tag::Short => self.skip_bytes(2)?,
                    Tag::Int | Tag::Float => self.skip_bytes(4)?,
                    Tag::Long | Tag::Double => self.skip_bytes(8)?,
                    Tag::String => self.skip_string()?,
                    Tag::ByteArray => {
                        let len = self.read_i32()?;
                        self.skip_bytes(try_size(len, 1)?)?;
                    }
                    Tag::IntArray => {
                        let len = self.read_i32()?;
                        self.skip_bytes(try_size(len, std::mem::size_of::<i32>())?)?;
                    }
                    Tag::List => {
                        let element_tag = self.read_tag()?;
                        let len = self.read_i32()?;

                        // Fixed size elements can be skipped in one go.
                        match element_tag.payload_width() {
                            Some(width) => self.skip_bytes(try_size(len, width)?)?,
                            None => layers.push(Layer::List(element_tag, try_size(len, 1)?)),
                        }
                    }
                    Tag::Compound => layers.push(Layer::Compound),
                }

                if layers.len() > MAX_DEPTH {
                    return Err(Error::bespoke(format!(
                        "nbt nested deeper than {} levels",
                        MAX_DEPTH
                    )));
                }
            }

            match layers.last_mut() {
                None => return Ok(()),
                Some(Layer::List(_, 0)) => {
                    layers.pop();
                }
                Some(Layer::List(element_tag, remaining)) => {
                    *remaining -= 1;
                    next = Some(*element_tag);
                }
                Some(Layer::Compound) => {
                    let tag = self.read_tag()?;
                    if tag == Tag::End {
                        layers.pop();
                    } else {
                        // consume the name.
                        self.skip_string()?;
                        next = Some(tag);
                    }
                }
            }
        }
    }

    /// Read a tag type, then skip its name and payload. Returns the tag that
    /// was skipped. An end tag has no name or payload, so only the tag byte is
    /// consumed for it.
    pub fn skip_named_tag(&mut self) -> Result<Tag> {
        let tag = self.read_tag()?;
        if tag != Tag::End {
            self.skip_string()?;
            self.skip_payload(tag)?;
        }
        Ok(tag)
    }

    /// The absolute position in the source, if the source can seek.
    pub fn position(&mut self) -> Result<Option<u64>> {
        if self.source.can_seek() {
            Ok(Some(self.source.position()?))
        } else {
            Ok(None)
        }
    }

    fn read_str_len(&mut self) -> Result<usize> {
        let len = self.read_i16()?;
        usize::try_from(len).map_err(|_| Error::negative_length(len.into()))
    }

    fn skip_bytes(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }

        if self.source.can_seek() {
            trace!("seeking past {} bytes", count);
            let pos = self.source.position()?;
            let target = u64::try_from(count)
                .ok()
                .and_then(|count| pos.checked_add(count))
                .ok_or_else(|| Error::bespoke("skip goes beyond the end of the source"))?;
            self.source.set_position(target)?;
            return Ok(());
        }

        trace!("reading past {} bytes", count);
        let buf = self
            .skip_buf
            .get_or_insert_with(|| vec![0; SKIP_BUFFER_SIZE].into_boxed_slice());

        let mut remaining = count;
        while remaining > 0 {
            let want = remaining.min(buf.len());
            match self.source.read(&mut buf[..want]) {
                Ok(0) => return Err(Error::unexpected_eof()),
                Ok(n) => remaining -= n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    /// The selector set by the caller, if any.
    pub fn selector(&self) -> Option<&(dyn TagSelector + 'static)> {
        self.selector.as_deref()
    }

    pub fn selector_mut(&mut self) -> Option<&mut (dyn TagSelector + 'static)> {
        self.selector.as_deref_mut()
    }

    /// Attach a selector for whatever is building values from this reader.
    /// Replaces any previous selector.
    pub fn set_selector<T: TagSelector + 'static>(&mut self, selector: T) {
        self.selector = Some(Box::new(selector));
    }

    /// Remove the selector, returning it.
    pub fn take_selector(&mut self) -> Option<Box<dyn TagSelector>> {
        self.selector.take()
    }

    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    /// Gets a mutable reference to the underlying source. Reading from it
    /// directly moves the reader along as well.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consumes this reader, returning the underlying source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

fn try_size(size: i32, multiplier: usize) -> Result<usize> {
    let size: usize = size
        .try_into()
        .map_err(|_| Error::negative_length(size))?;

    size.checked_mul(multiplier)
        .ok_or_else(|| Error::bespoke("size too large"))
}

fn decode_str(policy: StringPolicy, bytes: &[u8]) -> Result<String> {
    match policy {
        StringPolicy::Strict => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| Error::nonunicode(bytes.to_vec())),
        StringPolicy::Lossy => {
            let s = String::from_utf8_lossy(bytes);
            if let Cow::Owned(_) = s {
                warn!("replaced invalid utf-8 in nbt string: {:?}", s);
            }
            Ok(s.into_owned())
        }
        StringPolicy::JavaCesu8 => cesu8::from_java_cesu8(bytes)
            .map(Cow::into_owned)
            .map_err(|_| Error::nonunicode(bytes.to_vec())),
    }
}

fn decode_string(policy: StringPolicy, bytes: Vec<u8>) -> Result<String> {
    match policy {
        // Avoid copying the buffer we just allocated.
        StringPolicy::Strict => {
            String::from_utf8(bytes).map_err(|e| Error::nonunicode(e.into_bytes()))
        }
        _ => decode_str(policy, &bytes),
    }
}
