use std::cell::Cell;
use std::convert::TryFrom;
use std::io::Read;
use std::rc::Rc;

use crate::{ByteOrder, NbtReader, Sequential, Tag};





mod strings;

const ORDERS: [ByteOrder; 2] = [ByteOrder::BigEndian, ByteOrder::LittleEndian];

fn reader_for(order: ByteOrder, data: &[u8]) -> NbtReader<Sequential<&[u8]>> {
    NbtReader::sequential(data, order)
}

/// Reader that hands out at most `max` bytes per read, like a socket might.
struct Trickle<R> {
    inner: R,
    max: usize,
}

impl<R: Read> Read for Trickle<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.max);
        self.inner.read(&mut buf[..n])
    }
}

/// Reader that fails with `Interrupted` on every other call, and otherwise
/// hands out at most `max` bytes.
struct Interrupting<R> {
    inner: R,
    max: usize,
    interrupt: bool,
}

impl<R: Read> Read for Interrupting<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(std::io::ErrorKind::Interrupted.into());
        }

        let n = buf.len().min(self.max);
        self.inner.read(&mut buf[..n])
    }
}

/// Reader that counts how many times it has been read from.
struct Counting<R> {
    inner: R,
    reads: Rc<Cell<usize>>,
}

impl<R: Read> Read for Counting<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reads.set(self.reads.get() + 1);
        self.inner.read(buf)
    }
}

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(Tag::$tag), $val);
            assert_eq!(Tag::try_from($val as u8), Ok(Tag::$tag));
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
    }

    for value in 12..=u8::MAX {
        assert!(Tag::try_from(value).is_err())
    }
}

#[test]
fn read_tag_every_byte() {
    for value in 0..=u8::MAX {
        let data = [value, 0xAB];
        let mut reader = reader_for(ByteOrder::BigEndian, &data);

        match reader.read_tag() {
            Ok(tag) => {
                assert!(value <= 11);
                assert_eq!(u8::from(tag), value);
            }
            Err(e) => {
                assert!(value > 11);
                assert!(e.is_format());
                assert_eq!(e.kind(), &crate::error::ErrorKind::InvalidTag(value));
            }
        }

        // exactly one byte consumed either way.
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
    }
}

#[test]
fn read_tag_empty_is_eof() {
    let mut reader = reader_for(ByteOrder::BigEndian, &[]);
    assert!(reader.read_tag().unwrap_err().is_eof());
}

#[test]
fn payload_widths() {
    assert_eq!(Tag::End.payload_width(), Some(0));
    assert_eq!(Tag::Byte.payload_width(), Some(1));
    assert_eq!(Tag::Short.payload_width(), Some(2));
    assert_eq!(Tag::Int.payload_width(), Some(4));
    assert_eq!(Tag::Float.payload_width(), Some(4));
    assert_eq!(Tag::Long.payload_width(), Some(8));
    assert_eq!(Tag::Double.payload_width(), Some(8));
    assert_eq!(Tag::String.payload_width(), None);
    assert_eq!(Tag::Compound.payload_width(), None);
}
