use crate::Tag;

/// Decides whether a tag should be fully read or skipped.
///
/// A reader carries at most one selector for whoever is building values on
/// top of it. The reader itself never consults it; it only keeps it alongside
/// the source so a tree builder can get to both through one value.
///
/// Any `FnMut(Tag, &str) -> bool` closure is a selector:
///
/// ```
/// use nbtreader::{ByteOrder, NbtReader, Tag, TagSelector};
///
/// let mut reader = NbtReader::sequential(std::io::empty(), ByteOrder::BigEndian);
/// reader.set_selector(|tag: Tag, name: &str| tag != Tag::ByteArray || name != "Blocks");
///
/// let selector = reader.selector_mut().unwrap();
/// assert!(!selector.select(Tag::ByteArray, "Blocks"));
/// assert!(selector.select(Tag::Int, "xPos"));
/// ```
pub trait TagSelector {
    /// Return `true` if the tag with this type and name should be read.
    fn select(&mut self, tag: Tag, name: &str) -> bool;
}

impl<F> TagSelector for F
where
    F: FnMut(Tag, &str) -> bool,
{
    fn select(&mut self, tag: Tag, name: &str) -> bool {
        self(tag, name)
    }
}
