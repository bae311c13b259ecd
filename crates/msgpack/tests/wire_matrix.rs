use msgpack_codec::{pack, unpack, MsgPackEncoder, PackOptions, PackValue};

fn encode(value: &PackValue) -> Vec<u8> {
    pack(value).unwrap()
}

fn roundtrip(value: &PackValue) -> PackValue {
    unpack(&encode(value)).unwrap()
}

#[test]
fn wire_matrix_integers() {
    assert_eq!(encode(&PackValue::Int(0)), [0x00]);
    assert_eq!(encode(&PackValue::Int(127)), [0x7f]);
    assert_eq!(encode(&PackValue::Int(128)), [0xcc, 0x80]);
    assert_eq!(encode(&PackValue::Int(255)), [0xcc, 0xff]);
    assert_eq!(encode(&PackValue::Int(256)), [0xcd, 0x01, 0x00]);
    assert_eq!(encode(&PackValue::Int(65535)), [0xcd, 0xff, 0xff]);
    assert_eq!(encode(&PackValue::Int(65536)), [0xce, 0x00, 0x01, 0x00, 0x00]);
    assert_eq!(
        encode(&PackValue::UInt(u32::MAX as u64)),
        [0xce, 0xff, 0xff, 0xff, 0xff]
    );
    assert_eq!(
        encode(&PackValue::UInt(u32::MAX as u64 + 1)),
        [0xcf, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        encode(&PackValue::UInt(u64::MAX)),
        [0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
    );

    assert_eq!(encode(&PackValue::Int(-1)), [0xff]);
    assert_eq!(encode(&PackValue::Int(-32)), [0xe0]);
    assert_eq!(encode(&PackValue::Int(-33)), [0xd0, 0xdf]);
    assert_eq!(encode(&PackValue::Int(-128)), [0xd0, 0x80]);
    assert_eq!(encode(&PackValue::Int(-129)), [0xd1, 0xff, 0x7f]);
    assert_eq!(encode(&PackValue::Int(-32768)), [0xd1, 0x80, 0x00]);
    assert_eq!(
        encode(&PackValue::Int(-32769)),
        [0xd2, 0xff, 0xff, 0x7f, 0xff]
    );
    assert_eq!(
        encode(&PackValue::Int(i32::MIN as i64)),
        [0xd2, 0x80, 0x00, 0x00, 0x00]
    );
    assert_eq!(
        encode(&PackValue::Int(i32::MIN as i64 - 1)),
        [0xd3, 0xff, 0xff, 0xff, 0xff, 0x7f, 0xff, 0xff, 0xff]
    );
    assert_eq!(
        encode(&PackValue::Int(i64::MIN)),
        [0xd3, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn integer_boundary_roundtrips() {
    let cases: &[i64] = &[
        0,
        1,
        127,
        128,
        255,
        256,
        65535,
        65536,
        u32::MAX as i64,
        u32::MAX as i64 + 1,
        i64::MAX,
        -1,
        -32,
        -33,
        -128,
        -129,
        -32768,
        -32769,
        i32::MIN as i64,
        i32::MIN as i64 - 1,
        i64::MIN,
    ];
    for &x in cases {
        assert_eq!(roundtrip(&PackValue::Int(x)), PackValue::Int(x), "{x}");
    }
    for &x in &[i64::MAX as u64 + 1, u64::MAX] {
        assert_eq!(roundtrip(&PackValue::UInt(x)), PackValue::UInt(x), "{x}");
    }
}

#[test]
fn wire_matrix_floats() {
    assert_eq!(
        encode(&PackValue::Float32(1.5)),
        [0xca, 0x3f, 0xc0, 0x00, 0x00]
    );
    assert_eq!(
        encode(&PackValue::Float64(1.5)),
        [0xcb, 0x3f, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
    // No implicit narrowing in either direction
    assert_eq!(roundtrip(&PackValue::Float32(0.25)), PackValue::Float32(0.25));
    assert_eq!(roundtrip(&PackValue::Float64(0.25)), PackValue::Float64(0.25));
}

#[test]
fn wire_matrix_strings() {
    assert_eq!(encode(&PackValue::Str("".into())), [0xa0]);
    assert_eq!(
        encode(&PackValue::Str("abc".into())),
        [0xa3, b'a', b'b', b'c']
    );
    // UTF-8 byte length, not char count
    assert_eq!(
        encode(&PackValue::Str("✅".into())),
        [0xa3, 0xe2, 0x9c, 0x85]
    );

    let s31 = "x".repeat(31);
    assert_eq!(encode(&PackValue::Str(s31.clone()))[0], 0xbf);
    let s32 = "x".repeat(32);
    assert_eq!(&encode(&PackValue::Str(s32.clone()))[..2], &[0xd9, 32]);
    let s256 = "x".repeat(256);
    assert_eq!(&encode(&PackValue::Str(s256.clone()))[..3], &[0xda, 0x01, 0x00]);
    let s65536 = "x".repeat(65536);
    assert_eq!(
        &encode(&PackValue::Str(s65536.clone()))[..5],
        &[0xdb, 0x00, 0x01, 0x00, 0x00]
    );

    for s in [s31, s32, s256, s65536] {
        assert_eq!(roundtrip(&PackValue::Str(s.clone())), PackValue::Str(s));
    }
}

#[test]
fn wire_matrix_bin() {
    assert_eq!(encode(&PackValue::Bin(vec![])), [0xc4, 0x00]);
    assert_eq!(encode(&PackValue::Bin(vec![1, 2, 3])), [0xc4, 3, 1, 2, 3]);
    let b256 = vec![0u8; 256];
    assert_eq!(&encode(&PackValue::Bin(b256.clone()))[..3], &[0xc5, 0x01, 0x00]);
    let b65536 = vec![0u8; 65536];
    assert_eq!(
        &encode(&PackValue::Bin(b65536.clone()))[..5],
        &[0xc6, 0x00, 0x01, 0x00, 0x00]
    );
    assert_eq!(roundtrip(&PackValue::Bin(b256.clone())), PackValue::Bin(b256));
}

#[test]
fn wire_matrix_containers() {
    assert_eq!(
        encode(&PackValue::Array(vec![
            PackValue::Int(1),
            PackValue::Int(2),
            PackValue::Int(3)
        ])),
        [0x93, 0x01, 0x02, 0x03]
    );

    let a15 = PackValue::Array(vec![PackValue::Nil; 15]);
    assert_eq!(encode(&a15)[0], 0x9f);
    let a16 = PackValue::Array(vec![PackValue::Nil; 16]);
    assert_eq!(&encode(&a16)[..3], &[0xdc, 0x00, 0x10]);
    let a65536 = PackValue::Array(vec![PackValue::Nil; 65536]);
    assert_eq!(&encode(&a65536)[..5], &[0xdd, 0x00, 0x01, 0x00, 0x00]);

    let pair = |k: i64, v: i64| (PackValue::Int(k), PackValue::Int(v));
    let m = PackValue::Map(vec![pair(1, 2), pair(3, 4), pair(5, 6)]);
    assert_eq!(encode(&m), [0x83, 1, 2, 3, 4, 5, 6]);
    let m16 = PackValue::Map((0..16).map(|i| pair(i, i)).collect());
    assert_eq!(&encode(&m16)[..3], &[0xde, 0x00, 0x10]);

    for v in [a15, a16, a65536, m, m16] {
        assert_eq!(roundtrip(&v), v);
    }
}

#[test]
fn map_order_and_duplicates_are_preserved() {
    let m = PackValue::Map(vec![
        (PackValue::Str("b".into()), PackValue::Int(1)),
        (PackValue::Str("a".into()), PackValue::Int(2)),
        (PackValue::Str("b".into()), PackValue::Int(3)),
    ]);
    assert_eq!(roundtrip(&m), m);
}

#[test]
fn wire_matrix_ext() {
    // Fixext forms for payload lengths 1, 2, 4, 8, 16
    for (len, tag_byte) in [(1, 0xd4u8), (2, 0xd5), (4, 0xd6), (8, 0xd7), (16, 0xd8)] {
        let v = PackValue::Ext(7, vec![0xaa; len]);
        let bytes = encode(&v);
        assert_eq!(bytes[0], tag_byte);
        assert_eq!(bytes[1], 0x07);
        assert_eq!(bytes.len(), 2 + len);
        assert_eq!(roundtrip(&v), v);
    }

    // Everything else goes through ext8/16/32
    assert_eq!(
        encode(&PackValue::Ext(42, b"abc".to_vec())),
        [0xc7, 0x03, 0x2a, b'a', b'b', b'c']
    );
    assert_eq!(encode(&PackValue::Ext(-1, vec![])), [0xc7, 0x00, 0xff]);
    let e256 = PackValue::Ext(3, vec![0; 256]);
    assert_eq!(&encode(&e256)[..3], &[0xc8, 0x01, 0x00]);
    let e65536 = PackValue::Ext(3, vec![0; 65536]);
    assert_eq!(&encode(&e65536)[..5], &[0xc9, 0x00, 0x01, 0x00, 0x00]);

    assert_eq!(
        roundtrip(&PackValue::Ext(42, b"abc".to_vec())),
        PackValue::Ext(42, b"abc".to_vec())
    );
    // Negative tags survive the signed byte
    assert_eq!(
        roundtrip(&PackValue::Ext(-128, vec![9])),
        PackValue::Ext(-128, vec![9])
    );
}

#[test]
fn legacy_str_family_for_bin() {
    let mut legacy = MsgPackEncoder::with_options(PackOptions {
        use_bin_type: false,
    });
    assert_eq!(
        legacy.encode(&PackValue::Bin(vec![1, 2, 3])).unwrap(),
        vec![0xa3, 1, 2, 3]
    );
    // Legacy mode also never emits str8 for text
    let s40 = "x".repeat(40);
    let bytes = legacy.encode(&PackValue::Str(s40)).unwrap();
    assert_eq!(&bytes[..3], &[0xda, 0x00, 40]);
}

#[test]
fn nested_value_roundtrip() {
    let v = PackValue::Map(vec![
        (
            PackValue::Str("list".into()),
            PackValue::Array(vec![
                PackValue::Int(-7),
                PackValue::Float64(2.5),
                PackValue::Bin(vec![0, 255]),
                PackValue::Map(vec![(PackValue::UInt(1), PackValue::Bool(false))]),
            ]),
        ),
        (PackValue::Int(99), PackValue::Ext(5, vec![1, 2, 3, 4])),
    ]);
    assert_eq!(roundtrip(&v), v);
}
