use num_bigint::BigInt;
use stax_codec::{
    compress_int_array, compress_value, cram, cram_single, is_packed, is_packed_bytes, pack,
    pack_bytes, read_program, uncram, uncram_single, unpack, unpack_bytes, write_packed,
    DecompressCache, Error, HuffmanTable, Value,
};
use std::io::Cursor;

fn ints(values: &[i64]) -> Vec<BigInt> {
    values.iter().copied().map(BigInt::from).collect()
}

#[test]
fn test_cram_arithmetic_progression_prefers_offsets() {
    let progression = ints(&[10, 20, 30, 40]);
    let crammed = cram(&progression);
    assert_eq!(crammed, "EEEF");
    assert_eq!(uncram(&crammed).unwrap(), progression);

    let longer: Vec<BigInt> = (1..=50).map(|n| BigInt::from(n * 7)).collect();
    let crammed = cram(&longer);
    assert!(crammed.len() < 100);
    assert_eq!(uncram(&crammed).unwrap(), longer);
}

#[test]
fn test_cram_edge_sequences() {
    for values in [
        vec![],
        ints(&[0]),
        ints(&[0, 0, 0, 0]),
        ints(&[-1, -2, -3]),
        ints(&[i64::MAX, i64::MIN, 0]),
        ints(&[21, 22, 44, 45, 46, 989, 990, 991]),
    ] {
        assert_eq!(uncram(&cram(&values)).unwrap(), values, "{values:?}");
    }
}

#[test]
fn test_cram_huge_numbers() {
    let huge: BigInt = "123456789012345678901234567890123456789".parse().unwrap();
    let values = vec![huge.clone(), -huge];
    assert_eq!(uncram(&cram(&values)).unwrap(), values);
}

#[test]
fn test_cram_single_never_longer_than_decimal() {
    for n in [0i64, 7, 10, 99, 100, 144, 999_999, 1_000_000, 4_000_000, 123_456_789] {
        let n = BigInt::from(n);
        assert!(cram_single(&n).len() <= n.to_string().len(), "{n}");
    }
}

#[test]
fn test_cram_single_quoted_roundtrip() {
    let n = BigInt::from(987_654_321u64);
    let literal = cram_single(&n);
    let body = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('%'))
        .expect("quoted form");
    assert_eq!(uncram_single(body).unwrap(), n);
}

#[test]
fn test_compress_int_array_picks_shortest() {
    assert_eq!(compress_int_array(&[]), "z");
    assert_eq!(compress_int_array(&ints(&[1000, 2000])), "Vk2000\\");
    assert_eq!(compress_int_array(&ints(&[0, 0, 0])), "0]3*");
    let text: Vec<BigInt> = "Fizz".bytes().map(BigInt::from).collect();
    assert_eq!(compress_int_array(&text), "\"Fizz\"");
}

#[test]
fn test_compress_value_rejects_non_integer_kinds() {
    assert_eq!(compress_value(&Value::from(256)).as_deref(), Some("VB"));
    assert_eq!(compress_value(&Value::from(0.5)), None);
    assert_eq!(
        compress_value(&Value::Array(vec![Value::from(1), Value::from(0.5)])),
        None
    );
}

#[test]
fn test_pack_roundtrip_with_padding() {
    for text in ["1 2+", "abc   ", "   abc", "  a  ", "     ", "~", "\"Hello\"p"] {
        let packed = pack(text).unwrap();
        assert!(is_packed(&packed));
        assert_eq!(unpack(&packed).unwrap(), text, "{text:?}");
    }
}

#[test]
fn test_pack_trailing_padding_is_cheap() {
    let padded = pack("abcdefgh    ").unwrap();
    let leading = pack("    abcdefgh").unwrap();
    assert!(padded.chars().count() <= leading.chars().count());
}

#[test]
fn test_pack_bytes_marker_byte() {
    let bytes = pack_bytes("  ab").unwrap();
    assert_eq!(bytes, [131, 104, 172, 97]);
    assert!(is_packed_bytes(&bytes));
    assert_eq!(unpack_bytes(&bytes).unwrap(), "  ab");
}

#[test]
fn test_pack_errors() {
    assert!(matches!(
        pack("tab\there"),
        Err(Error::UnsupportedCharacter { ch: '\t', offset: 3, .. })
    ));
    assert_eq!(unpack("1 2+"), Err(Error::NotPacked));
}

#[test]
fn test_huffman_injected_table() {
    let spec = " \te1h1l0\ne\te1h1l0\nh\te1h1l0\nl\te1h1l0\n";
    let table = HuffmanTable::from_spec(spec).unwrap();
    let code = table.compress("hell").unwrap();
    assert_eq!(table.decompress(&code).unwrap(), "hell");
    assert_eq!(table.compress("hello"), None);
    assert!(table.supports('h'));
    assert!(!table.supports('o'));
    assert_eq!(table.contexts().collect::<Vec<_>>(), [" ", "e", "h", "l"]);
}

#[test]
fn test_huffman_compresses_english() {
    let table = HuffmanTable::english().unwrap();
    let text = "the quick brown fox jumps over the lazy dog";
    let code = table.compress(text).unwrap();
    assert!(code.len() < text.len() * 3 / 4);
    assert_eq!(table.decompress(&code).unwrap(), text);
}

#[test]
fn test_shared_cache_across_threads() {
    let table = HuffmanTable::english().unwrap();
    let cache = DecompressCache::new();
    let code = table.compress("Shared cache").unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                assert_eq!(cache.decompress(table, &code).unwrap(), "Shared cache");
            });
        }
    });
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_program_io() {
    let mut buffer = Vec::new();
    write_packed(&mut buffer, "VkJ").unwrap();
    assert_eq!(read_program(Cursor::new(&buffer)).unwrap(), "VkJ");
    assert_eq!(read_program(Cursor::new("VkJ")).unwrap(), "VkJ");
}
