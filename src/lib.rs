//! nbtreader reads the primitive building blocks of NBT data: tag types,
//! integers, floats, strings. It works in either byte order, so the same
//! reader handles *Minecraft: Java Edition* data (big endian) and *Bedrock
//! Edition* data (little endian).
//!
//! This is deliberately low level. There is no tree of tags here, and no
//! decompression. Something above this crate decides what the bytes mean, and
//! something below it inflates them. See [`NbtReader`] for the reads
//! available.
//!
//! # Quick example
//!
//! ```
//! use nbtreader::{ByteOrder, NbtReader, Tag};
//!
//! # fn main() -> nbtreader::error::Result<()> {
//! // An Int tag called "x" holding 5, written big endian.
//! let data = [3, 0, 1, b'x', 0, 0, 0, 5];
//! let mut reader = NbtReader::sequential(&data[..], ByteOrder::BigEndian);
//!
//! assert_eq!(reader.read_tag()?, Tag::Int);
//! assert_eq!(reader.read_string()?, "x");
//! assert_eq!(reader.read_i32()?, 5);
//! # Ok(())
//! # }
//! ```
//!
//! # Sources
//!
//! The reader owns a [`Source`]. Wrap anything that is `Read + Seek` (a file,
//! a `Cursor`) in [`Seekable`] and skips become a seek. Wrap anything that is
//! only `Read` (a socket, a gzip decoder) in [`Sequential`] and skips read
//! and discard instead.
//!
//! # Skipping
//!
//! Callers that don't care about a value can skip it without decoding it,
//! either by raw byte count, by string, or by whole tag payload with
//! [`NbtReader::skip_payload`].

use serde::{Deserialize, Serialize};

pub mod error;
pub mod source;

mod options;
mod reader;
mod selector;

pub use options::*;
pub use reader::*;
pub use selector::*;
pub use source::{Seekable, Sequential, Source};

#[cfg(test)]
mod test;

use std::convert::TryFrom;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other objects, all of the same tag.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
}

impl Tag {
    /// Size in bytes of the payload for tags with a fixed size payload. `None`
    /// for tags whose payload size depends on the data.
    pub fn payload_width(self) -> Option<usize> {
        match self {
            Tag::End => Some(0),
            Tag::Byte => Some(1),
            Tag::Short => Some(2),
            Tag::Int | Tag::Float => Some(4),
            Tag::Long | Tag::Double => Some(8),
            Tag::ByteArray | Tag::String | Tag::List | Tag::Compound | Tag::IntArray => None,
        }
    }
}

// Crates exist to generate this code for us, but would add to our compile
// times, so we instead write it out manually. The tags will very rarely change
// so it isn't a massive burden.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::End => 0,
            Tag::Byte => 1,
            Tag::Short => 2,
            Tag::Int => 3,
            Tag::Long => 4,
            Tag::Float => 5,
            Tag::Double => 6,
            Tag::ByteArray => 7,
            Tag::String => 8,
            Tag::List => 9,
            Tag::Compound => 10,
            Tag::IntArray => 11,
        }
    }
}
