#![no_main]
use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

use nbtreader::{ByteOrder, NbtReader, Tag};

fuzz_target!(|data: &[u8]| {
    // Seeking and reading past data must agree on where each tag ends.
    let mut seq = NbtReader::sequential(data, ByteOrder::BigEndian);
    let mut seek = NbtReader::seekable(Cursor::new(data), ByteOrder::BigEndian);

    loop {
        let a = seq.skip_named_tag();
        let b = seek.skip_named_tag();
        match (a, b) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a, b);
                if a == Tag::End {
                    break;
                }
            }
            _ => break,
        }
    }
});
