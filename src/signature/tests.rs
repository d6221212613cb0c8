use proptest::prelude::*;

use crate::proto::Endianness;
use crate::{DBusType, OwnedBuf, ParsedSignature, Signature};

use super::{SignatureErrorKind, MAX_SIGNATURE};

use SignatureErrorKind::*;

// Every case is run through both the validator and the vectorizing parser,
// which must agree on the outcome.
macro_rules! check {
    ($input:expr, $expected:pat) => {{
        let validated = Signature::new($input).map_err(|e| e.kind);

        assert!(
            matches!(validated, $expected),
            "{validated:?} does not match {}",
            stringify!($expected)
        );

        let parsed = ParsedSignature::parse($input).map(|_| ()).map_err(|e| e.kind);

        assert!(
            matches!(parsed, $expected),
            "parse: {parsed:?} does not match {}",
            stringify!($expected)
        );
    }};
}

#[test]
fn well_formed_signatures() {
    check!(b"", Ok(..));
    check!(b"v", Ok(..));
    check!(b"ybnqiuxtdhsog", Ok(..));
    check!(b"aay", Ok(..));
    check!(b"av", Ok(..));
    check!(b"a{sv}", Ok(..));
    check!(b"a{s(ii)}", Ok(..));
    check!(b"(ysa{sv})", Ok(..));
    check!(b"yyyyuua(yv)", Ok(..));
}

#[test]
fn unknown_type_codes() {
    check!(b"z", Err(UnknownTypeCode(b'z')));
    check!(b"u z", Err(UnknownTypeCode(b' ')));
    check!(b"iii.", Err(UnknownTypeCode(b'.')));
    // Codes reserved for bindings must not appear on the wire.
    check!(b"r", Err(UnknownTypeCode(b'r')));
    check!(b"e", Err(UnknownTypeCode(b'e')));
    check!(b"m", Err(UnknownTypeCode(b'm')));
    check!(b"*", Err(UnknownTypeCode(b'*')));
}

#[test]
fn struct_grammar() {
    check!(b"(y)", Ok(..));
    check!(b"(yy)(yy)", Ok(..));
    check!(b"()", Err(StructHasNoFields));
    check!(b"y()y", Err(StructHasNoFields));
    check!(b"(", Err(StructStartedButNotEnded));
    check!(b"(y(u)", Err(StructStartedButNotEnded));
    check!(b")", Err(StructEndedButNotStarted));
    check!(b"y)", Err(StructEndedButNotStarted));
    check!(b"(y))", Err(StructEndedButNotStarted));
}

#[test]
fn dict_entry_grammar() {
    check!(b"a{yv}", Ok(..));
    check!(b"a{s(ub)}", Ok(..));
    check!(b"}", Err(DictEndedButNotStarted));
    check!(b"{sv}", Err(DictEntryNotInsideArray));
    // The entry must be the immediate element type of the array.
    check!(b"a({sv})", Err(DictEntryNotInsideArray));
    check!(b"a{", Err(DictStartedButNotEnded));
    check!(b"a{s", Err(DictStartedButNotEnded));
    check!(b"a{sv", Err(DictStartedButNotEnded));
    check!(b"a{}", Err(DictEntryHasNoFields));
    check!(b"a{s}", Err(DictEntryHasOnlyOneField));
    check!(b"a{svv}", Err(DictEntryHasTooManyFields));
    check!(b"a{vs}", Err(DictKeyMustBeBasicType));
    check!(b"a{(s)u}", Err(DictKeyMustBeBasicType));
    check!(b"a{a{ss}u}", Err(DictKeyMustBeBasicType));
}

#[test]
fn array_grammar() {
    check!(b"au", Ok(..));
    check!(b"a", Err(MissingArrayElementType));
    check!(b"ya", Err(MissingArrayElementType));
    check!(b"aa", Err(MissingArrayElementType));
    check!(b"a)", Err(MissingArrayElementType));
    check!(b"a}", Err(MissingArrayElementType));
    check!(b"(ya)", Err(MissingArrayElementType));
}

#[test]
fn nesting_and_length_limits() {
    let mut arrays = vec![b'a'; 32];
    arrays.push(b'u');
    check!(&arrays[..], Ok(..));

    let mut arrays = vec![b'a'; 33];
    arrays.push(b'u');
    check!(&arrays[..], Err(ExceededMaximumArrayRecursion));

    let mut structs = vec![b'('; 32];
    structs.push(b'u');
    structs.extend(vec![b')'; 32]);
    check!(&structs[..], Ok(..));

    let mut structs = vec![b'('; 33];
    structs.push(b'u');
    structs.extend(vec![b')'; 33]);
    check!(&structs[..], Err(ExceededMaximumStructRecursion));

    check!(&[b'u'; MAX_SIGNATURE][..], Ok(..));
    check!(&[b'u'; MAX_SIGNATURE + 1][..], Err(SignatureTooLong));
}

#[test]
fn parse_dict_array() -> crate::Result<()> {
    let parsed = ParsedSignature::parse(b"a{ys}")?;

    assert_eq!(
        parsed.types(),
        [
            DBusType::Array,
            DBusType::DictEntry,
            DBusType::DictEntryLength(2),
            DBusType::Byte,
            DBusType::String,
        ]
    );

    Ok(())
}

#[test]
fn parse_nested_struct() -> crate::Result<()> {
    let parsed = ParsedSignature::parse(b"(y(y(y(y))))")?;

    assert_eq!(
        parsed.types(),
        [
            DBusType::Struct,
            DBusType::StructLength(2),
            DBusType::Byte,
            DBusType::Struct,
            DBusType::StructLength(2),
            DBusType::Byte,
            DBusType::Struct,
            DBusType::StructLength(2),
            DBusType::Byte,
            DBusType::Struct,
            DBusType::StructLength(1),
            DBusType::Byte,
        ]
    );

    Ok(())
}

#[test]
fn render_inverts_parse() -> crate::Result<()> {
    for sig in [
        &b""[..],
        b"y",
        b"a{ys}",
        b"(y(y(y(y))))",
        b"a(ss)a{sv}",
        b"aav",
        b"(yyyyuua(yv))",
    ] {
        let parsed = ParsedSignature::parse(sig)?;
        assert_eq!(parsed.render().as_bytes(), sig);
    }

    Ok(())
}

#[test]
fn complete_types() -> crate::Result<()> {
    let parsed = ParsedSignature::parse(b"ya{ys}(uu)")?;
    let mut it = parsed.iter();

    assert_eq!(it.next(), Some(&[DBusType::Byte][..]));

    assert_eq!(
        it.next(),
        Some(
            &[
                DBusType::Array,
                DBusType::DictEntry,
                DBusType::DictEntryLength(2),
                DBusType::Byte,
                DBusType::String,
            ][..]
        )
    );

    assert_eq!(
        it.next(),
        Some(
            &[
                DBusType::Struct,
                DBusType::StructLength(2),
                DBusType::Uint32,
                DBusType::Uint32,
            ][..]
        )
    );

    assert_eq!(it.next(), None);
    Ok(())
}

#[test]
fn signature_skip() -> crate::Result<()> {
    let mut buf = OwnedBuf::with_endianness(Endianness::LITTLE);
    buf.write("Hello World");

    let sig = Signature::new_const(b"s");

    let mut read = buf.read_buf();
    sig.skip(&mut read)?;

    assert!(read.is_empty(), "{:?}", read.get());
    Ok(())
}

#[test]
fn signature_skip_array_of_structs() -> crate::Result<()> {
    let mut buf = OwnedBuf::with_endianness(Endianness::LITTLE);

    let mut array = crate::ArrayWriter::new(&mut buf, 8);
    array.align_mut(8);
    array.store(1u32);
    array.store(2u64);
    array.align_mut(8);
    array.store(3u32);
    array.store(4u64);
    array.finish()?;

    buf.store(0xffu8);

    let sig = Signature::new_const(b"a(ut)");

    let mut read = buf.read_buf();
    sig.skip(&mut read)?;

    assert_eq!(read.load::<u8>()?, 0xff);
    Ok(())
}

fn basic_code() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "y", "b", "n", "q", "i", "u", "x", "t", "d", "h", "s", "o", "g",
    ])
    .prop_map(String::from)
}

fn complete_type() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        basic_code(),
        Just(String::from("v")),
    ];

    leaf.prop_recursive(4, 16, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|element| format!("a{element}")),
            prop::collection::vec(inner.clone(), 1..4)
                .prop_map(|fields| format!("({})", fields.concat())),
            (basic_code(), inner).prop_map(|(key, value)| format!("a{{{key}{value}}}")),
        ]
    })
}

proptest! {
    #[test]
    fn parse_render_round_trip(parts in prop::collection::vec(complete_type(), 0..4)) {
        let text = parts.concat();
        prop_assume!(text.len() <= MAX_SIGNATURE);

        let parsed = ParsedSignature::parse(text.as_bytes()).unwrap();
        let rendered = parsed.render();
        prop_assert_eq!(rendered.as_str(), text);
    }
}
