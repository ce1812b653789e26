use serde::{Deserialize, Serialize};

/// Order of bytes for multi-byte values in the stream.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Most significant byte first. Java Edition NBT.
    #[default]
    #[serde(alias = "big")]
    BigEndian,
    /// Least significant byte first. Bedrock Edition NBT.
    #[serde(alias = "little")]
    LittleEndian,
}

impl ByteOrder {
    /// The byte order of the machine we are running on.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    pub fn from_big_endian(big_endian: bool) -> Self {
        if big_endian {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    pub fn is_big_endian(self) -> bool {
        self == ByteOrder::BigEndian
    }
}

/// What to do with string payloads that are not valid text.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum StringPolicy {
    /// Payload must be valid UTF-8, otherwise error.
    #[default]
    Strict,
    /// Invalid sequences are replaced with U+FFFD.
    Lossy,
    /// Payload is Java's modified UTF-8 (CESU-8 with two byte nulls). This is
    /// what Java Edition actually writes, so strict UTF-8 can reject
    /// strings containing supplementary characters such as emoji.
    JavaCesu8,
}

/// Options for building an [`NbtReader`][`crate::NbtReader`].
///
/// ```
/// use nbtreader::{ByteOrder, ReaderOptions, StringPolicy};
///
/// let opts = ReaderOptions::new()
///     .byte_order(ByteOrder::LittleEndian)
///     .strings(StringPolicy::Lossy);
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[serde(default)]
pub struct ReaderOptions {
    pub(crate) byte_order: ByteOrder,
    pub(crate) strings: StringPolicy,
}

impl ReaderOptions {
    /// Big endian, strict strings.
    pub fn new() -> Self {
        Default::default()
    }

    /// Byte order of the stream.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// How string payloads are decoded.
    pub fn strings(mut self, policy: StringPolicy) -> Self {
        self.strings = policy;
        self
    }
}
