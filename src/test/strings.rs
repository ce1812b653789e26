use super::{builder::Builder, reader_for, ORDERS};
use crate::error::{ErrorKind, Result};
use crate::{ByteOrder, NbtReader, ReaderOptions, StringPolicy, STRING_BUFFER_SIZE};

fn reader_with_policy(data: &[u8], policy: StringPolicy) -> NbtReader<&[u8]> {
    NbtReader::with_options(data, ReaderOptions::new().strings(policy))
}

#[test]
fn cat_example() -> Result<()> {
    let data = [0x00, 0x03, b'c', b'a', b't'];
    let mut reader = reader_for(ByteOrder::BigEndian, &data);
    assert_eq!(reader.read_string()?, "cat");
    Ok(())
}

#[test]
fn little_endian_prefix() -> Result<()> {
    let data = [0x03, 0x00, b'c', b'a', b't'];
    let mut reader = reader_for(ByteOrder::LittleEndian, &data);
    assert_eq!(reader.read_string()?, "cat");
    Ok(())
}

#[test]
fn empty_string() -> Result<()> {
    for order in ORDERS {
        let data = Builder::with_order(order).string_payload("").build();
        assert_eq!(reader_for(order, &data).read_string()?, "");
    }
    Ok(())
}

#[test]
fn short_and_long_strings_decode_the_same() -> Result<()> {
    let lengths = [
        1,
        STRING_BUFFER_SIZE - 1,
        STRING_BUFFER_SIZE,
        STRING_BUFFER_SIZE + 1,
        1000,
        i16::MAX as usize,
    ];

    for order in ORDERS {
        for len in lengths {
            let s = "x".repeat(len);
            let data = Builder::with_order(order)
                .string_payload(&s)
                .byte_payload(9)
                .build();

            let mut reader = reader_for(order, &data);
            assert_eq!(reader.read_string()?, s);
            assert_eq!(reader.read_byte()?, 9);
        }
    }
    Ok(())
}

#[test]
fn multibyte_utf8_both_paths() -> Result<()> {
    let short = "héllo wörld ☃";
    let long = "☃ snow ".repeat(20);
    assert!(short.len() < STRING_BUFFER_SIZE);
    assert!(long.len() >= STRING_BUFFER_SIZE);

    for order in ORDERS {
        let data = Builder::with_order(order)
            .string_payload(short)
            .string_payload(&long)
            .build();

        let mut reader = reader_for(order, &data);
        assert_eq!(reader.read_string()?, short);
        assert_eq!(reader.read_string()?, long);
    }
    Ok(())
}

#[test]
fn reused_scratch_does_not_leak_between_reads() -> Result<()> {
    let data = Builder::new()
        .string_payload("a much longer string than the next")
        .string_payload("tiny")
        .build();

    let mut reader = reader_for(ByteOrder::BigEndian, &data);
    reader.read_string()?;
    assert_eq!(reader.read_string()?, "tiny");
    Ok(())
}

#[test]
fn negative_length_consumes_only_prefix() {
    for order in ORDERS {
        let data = Builder::with_order(order)
            .short_payload(-1)
            .raw_bytes(b"abc")
            .build();

        let mut reader = reader_for(order, &data);
        let err = reader.read_string().unwrap_err();
        assert!(err.is_format());
        assert_eq!(err.kind(), &ErrorKind::NegativeLength(-1));

        // payload untouched.
        assert_eq!(reader.read_u8().unwrap(), b'a');
    }
}

#[test]
fn truncated_payload_is_eof() {
    for len in [10, 100] {
        let data = Builder::new()
            .raw_str_len(len)
            .raw_bytes(b"short")
            .build();

        let err = reader_for(ByteOrder::BigEndian, &data)
            .read_string()
            .unwrap_err();
        assert!(err.is_eof());
    }
}

#[test]
fn missing_prefix_is_eof() {
    let mut reader = reader_for(ByteOrder::BigEndian, &[0]);
    assert!(reader.read_string().unwrap_err().is_eof());
}

#[test]
fn strict_rejects_invalid_utf8() {
    for len in [2, 100] {
        let mut bytes = vec![b'a'; len];
        bytes[1] = 0xff;
        let data = Builder::new()
            .raw_str_len(len)
            .raw_bytes(&bytes)
            .build();

        let err = reader_with_policy(&data, StringPolicy::Strict)
            .read_string()
            .unwrap_err();
        assert!(err.is_format());
        assert_eq!(err.kind(), &ErrorKind::Nonunicode(bytes));
    }
}

#[test]
fn strict_is_the_default() {
    let data = Builder::new().raw_str_len(1).raw_bytes(&[0xC0]).build();
    let err = reader_for(ByteOrder::BigEndian, &data)
        .read_string()
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Nonunicode(_)));
}

#[test]
fn invalid_utf8_is_fully_consumed() {
    let data = Builder::new()
        .raw_str_len(2)
        .raw_bytes(&[0xff, 0xfe])
        .byte_payload(1)
        .build();

    let mut reader = reader_for(ByteOrder::BigEndian, &data);
    assert!(reader.read_string().is_err());
    assert_eq!(reader.read_byte().unwrap(), 1);
}

#[test]
fn lossy_replaces_invalid_utf8() -> Result<()> {
    let data = Builder::new()
        .raw_str_len(3)
        .raw_bytes(&[b'a', 0xff, b'b'])
        .build();

    let s = reader_with_policy(&data, StringPolicy::Lossy).read_string()?;
    assert_eq!(s, "a\u{FFFD}b");
    Ok(())
}

#[test]
fn lossy_leaves_valid_text_alone() -> Result<()> {
    let long = "ü".repeat(STRING_BUFFER_SIZE);
    let data = Builder::new().string_payload(&long).build();
    let s = reader_with_policy(&data, StringPolicy::Lossy).read_string()?;
    assert_eq!(s, long);
    Ok(())
}

#[test]
fn java_cesu8_strings() -> Result<()> {
    // Java writes nulls as two bytes and supplementary characters as
    // surrogate pairs.
    let text = "nul\0 and emoji 😀";
    let encoded = cesu8::to_java_cesu8(text);
    assert!(std::str::from_utf8(&encoded).is_err());

    let data = Builder::new()
        .raw_str_len(encoded.len())
        .raw_bytes(&encoded)
        .build();

    let s = reader_with_policy(&data, StringPolicy::JavaCesu8).read_string()?;
    assert_eq!(s, text);

    let err = reader_with_policy(&data, StringPolicy::Strict)
        .read_string()
        .unwrap_err();
    assert!(err.is_format());
    Ok(())
}

#[test]
fn java_cesu8_rejects_garbage() {
    let data = Builder::new().raw_str_len(1).raw_bytes(&[0xff]).build();
    let err = reader_with_policy(&data, StringPolicy::JavaCesu8)
        .read_string()
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Nonunicode(vec![0xff]));
}
