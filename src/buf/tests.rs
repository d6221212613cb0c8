use crate::error::ErrorKind;
use crate::proto::Endianness;
use crate::{ArrayWriter, OwnedBuf, ReadBuf};

#[test]
fn primitive_reads_little_endian() -> crate::Result<()> {
    let mut buf = ReadBuf::from_slice(&[0x12, 0x00, 0x34, 0x56, 0x78], Endianness::LITTLE);

    assert_eq!(buf.load::<u8>()?, 0x12);
    assert_eq!(buf.load::<i16>()?, 0x5634);
    assert_eq!(buf.load::<u8>()?, 0x78);
    assert_eq!(buf.pos(), 5);
    assert!(buf.is_empty());
    Ok(())
}

#[test]
fn primitive_reads_big_endian() -> crate::Result<()> {
    let mut buf = ReadBuf::from_slice(&[0x12, 0x00, 0x34, 0x56, 0x78], Endianness::BIG);

    assert_eq!(buf.load::<u8>()?, 0x12);
    assert_eq!(buf.load::<i16>()?, 0x3456);
    assert_eq!(buf.load::<u8>()?, 0x78);
    assert_eq!(buf.pos(), 5);
    Ok(())
}

#[test]
fn string_decode() -> crate::Result<()> {
    let mut buf = ReadBuf::from_slice(b"\x03\x00\x00\x00foo\x00", Endianness::LITTLE);

    assert_eq!(buf.read::<str>()?, "foo");
    assert_eq!(buf.pos(), 8);
    Ok(())
}

#[test]
fn end_of_stream() {
    let mut buf = ReadBuf::from_slice(&[], Endianness::LITTLE);

    let err = buf.load::<u8>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EndOfStream));
}

#[test]
fn aligned_read_out_of_bounds() {
    let mut buf = ReadBuf::from_slice(&[0, 0, 0], Endianness::LITTLE);

    let err = buf.load::<u32>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidAlignment));
}

#[test]
fn string_missing_nul() {
    let mut buf = ReadBuf::from_slice(b"\x03\x00\x00\x00fooX", Endianness::LITTLE);

    let err = buf.read::<str>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotNullTerminated));
}

#[test]
fn string_length_out_of_bounds() {
    let mut buf = ReadBuf::from_slice(b"\xff\x00\x00\x00foo\x00", Endianness::LITTLE);

    let err = buf.read::<str>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidLength(0xff)));
}

#[test]
fn array_frame_pads_to_element_alignment() -> crate::Result<()> {
    let bytes = [
        0x08, 0x00, 0x00, 0x00, // payload length
        0x00, 0x00, 0x00, 0x00, // padding to 8
        0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // one u64
    ];

    let mut buf = ReadBuf::from_slice(&bytes, Endianness::LITTLE);
    let mut array = buf.read_array_frame(8)?;

    assert_eq!(array.load::<u64>()?, 5);
    assert!(array.is_empty());
    assert_eq!(buf.pos(), 16);
    Ok(())
}

#[test]
fn array_frame_rejects_oversized_length() {
    let bytes = [0xff, 0xff, 0xff, 0xff];
    let mut buf = ReadBuf::from_slice(&bytes, Endianness::LITTLE);

    let err = buf.read_array_frame(4).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ArrayTooLong(0xffffffff)));
}

#[test]
fn sub_buffer_keeps_alignment_base() -> crate::Result<()> {
    let bytes = [
        0xaa, 0xaa, 0xaa, 0xaa, // consumed prefix
        0x01, 0x00, 0x00, 0x00, // u32 at absolute offset 4
        0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // u64 at absolute offset 8
    ];

    let mut buf = ReadBuf::from_slice(&bytes, Endianness::LITTLE);
    buf.advance(4)?;

    let mut sub = buf.read_buf(12)?;
    assert_eq!(sub.pos(), 4);
    assert_eq!(sub.load::<u32>()?, 1);

    // The u64 aligns against the start of the original buffer, not the
    // start of the sub view.
    assert_eq!(sub.load::<u64>()?, 2);
    assert!(sub.is_empty());
    Ok(())
}

#[test]
fn store_at_backfills_length() -> crate::Result<()> {
    let mut buf = OwnedBuf::with_endianness(Endianness::LITTLE);

    let len = buf.alloc::<u32>();
    buf.extend_from_slice(b"abcd");
    buf.store_at(len, 4u32);

    assert_eq!(buf.get(), b"\x04\x00\x00\x00abcd");
    Ok(())
}

#[test]
fn array_writer_counts_payload_only() -> crate::Result<()> {
    let mut buf = OwnedBuf::with_endianness(Endianness::LITTLE);

    let mut array = ArrayWriter::new(&mut buf, 8);
    array.store(5u64);
    array.finish()?;

    assert_eq!(
        buf.get(),
        &[8, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0]
    );
    Ok(())
}

#[test]
fn store_honors_big_endian() {
    let mut buf = OwnedBuf::with_endianness(Endianness::BIG);

    buf.store(0x12345678u32);
    assert_eq!(buf.get(), &[0x12, 0x34, 0x56, 0x78]);
}

#[cfg(not(feature = "strict-padding"))]
#[test]
fn padding_is_lenient_by_default() -> crate::Result<()> {
    let mut buf = ReadBuf::from_slice(&[1, 0xaa, 2, 0], Endianness::LITTLE);

    assert_eq!(buf.load::<u8>()?, 1);
    assert_eq!(buf.load::<u16>()?, 2);
    Ok(())
}

#[cfg(feature = "strict-padding")]
#[test]
fn nonzero_padding_is_rejected() -> crate::Result<()> {
    let mut buf = ReadBuf::from_slice(&[1, 0xaa, 2, 0], Endianness::LITTLE);

    assert_eq!(buf.load::<u8>()?, 1);

    let err = buf.load::<u16>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NonZeroPadding));
    Ok(())
}
