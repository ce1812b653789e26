#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use nbtreader::{NbtReader, ReaderOptions};

#[derive(Arbitrary, Debug)]
enum Op {
    Tag,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    Skip(i32),
    SkipString,
}

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    opts: ReaderOptions,
    ops: Vec<Op>,
    data: &'a [u8],
}

fuzz_target!(|input: Input| {
    let mut reader = NbtReader::with_options(input.data, input.opts);

    for op in input.ops {
        let res = match op {
            Op::Tag => reader.read_tag().map(drop),
            Op::Byte => reader.read_byte().map(drop),
            Op::Short => reader.read_i16().map(drop),
            Op::Int => reader.read_i32().map(drop),
            Op::Long => reader.read_i64().map(drop),
            Op::Float => reader.read_f32().map(drop),
            Op::Double => reader.read_f64().map(drop),
            Op::String => reader.read_string().map(drop),
            Op::Skip(n) => reader.skip(n),
            Op::SkipString => reader.skip_string(),
        };

        if let Err(e) = res {
            if e.is_eof() {
                break;
            }
        }
    }
});
