use stax_codec::{
    compress_literals, compress_literals_with, decompress_literals, decompress_literals_with,
    pack, DecompressCache, Error, HuffmanTable, LiteralOptions,
};

#[test]
fn test_compress_long_integer() {
    assert_eq!(compress_literals("1234567").unwrap(), "\"0V6Y%");
    assert_eq!(compress_literals("123456").unwrap(), "123456");
    assert_eq!(compress_literals("1 1234567 2").unwrap(), "1 \"0V6Y% 2");
}

#[test]
fn test_leading_zero_integers_are_kept() {
    assert_eq!(compress_literals("01234567").unwrap(), "01234567");
}

#[test]
fn test_compress_strings() {
    assert_eq!(
        compress_literals("\"Hello, World`!\"").unwrap(),
        "`di^^o?7'U<o-!`"
    );
    assert_eq!(compress_literals("\"hello world").unwrap(), "`f}$Fb8jM!$");
    assert_eq!(compress_literals("\"a\"").unwrap(), "\"a\"");
    // Redundant escape: decompression could not restore it
    assert_eq!(
        compress_literals("\"hello`world\"").unwrap(),
        "\"hello`world\""
    );
    // Control characters have no code
    assert_eq!(
        compress_literals("\"hello\u{1}world\"").unwrap(),
        "\"hello\u{1}world\""
    );
}

#[test]
fn test_compress_inside_blocks() {
    assert_eq!(
        compress_literals("{\"hello world\"p}F").unwrap(),
        "{`f}$Fb8jM!$`p}F"
    );
    assert_eq!(
        decompress_literals("{`f}$Fb8jM!$`p}F").unwrap(),
        "{\"hello world\"p}F"
    );
}

#[test]
fn test_cram_sequences() {
    assert_eq!(compress_literals("zA+20+30+40+").unwrap(), "\"EEEF!");
    assert_eq!(compress_literals("z1+2+3+p").unwrap(), "\"48c!p");
    // One term is not a sequence
    assert_eq!(compress_literals("z5+").unwrap(), "z5+");
}

#[test]
fn test_decompress_crammed_integers() {
    assert_eq!(decompress_literals("\"0V6Y%").unwrap(), "1234567");
    assert_eq!(decompress_literals("\"9%").unwrap(), "A");
    assert_eq!(decompress_literals("\"%").unwrap(), "0");
    assert_eq!(decompress_literals("1\"0V6Y%2").unwrap(), "1 1234567 2");
    assert_eq!(decompress_literals("5\"9%5").unwrap(), "5A5");
    assert_eq!(decompress_literals("\"0V6Y%!5").unwrap(), "1234567 !5");
}

#[test]
fn test_bang_after_integer_roundtrips() {
    for source in ["1234567!x", "1234567!", "{1234567!}F"] {
        let compressed = compress_literals(source).unwrap();
        assert_ne!(compressed, source);
        assert_eq!(decompress_literals(&compressed).unwrap(), source);
    }
    assert_eq!(decompress_literals("\"0V6Y%!x").unwrap(), "1234567!x");
    assert_eq!(decompress_literals("\"0V6Y%!\"0V6Y%").unwrap(), "1234567 !1234567");
}

#[test]
fn test_closing_digits_of_other_tokens_do_not_merge() {
    for source in ["'11234567", ".x11234567", "|11234567", "V11234567", "{1}g11234567"] {
        let compressed = compress_literals(source).unwrap();
        assert!(compressed.ends_with("\"0V6Y%"), "{} -> {}", source, compressed);
        assert_eq!(decompress_literals(&compressed).unwrap(), source);
    }
    assert_eq!(decompress_literals("3!25\"0V6Y%").unwrap(), "3!25 1234567");
    assert_eq!(decompress_literals("\"0V6Y%\"0V6Y%").unwrap(), "1234567 1234567");
}

#[test]
fn test_decompress_crammed_arrays() {
    assert_eq!(decompress_literals("\"EEEF!").unwrap(), "zA+20+30+40+");
    assert_eq!(decompress_literals("\"6!").unwrap(), "z1N+");
    assert_eq!(decompress_literals("\"!").unwrap(), "z");
}

#[test]
fn test_decompress_escapes_strings() {
    let compressed = compress_literals("\"Hello, World`!\"").unwrap();
    assert_eq!(
        decompress_literals(&compressed).unwrap(),
        "\"Hello, World`!\""
    );
}

#[test]
fn test_decompress_rejects_invalid_bodies() {
    assert!(matches!(
        decompress_literals("\"a`b%"),
        Err(Error::InvalidEncoding { ch: '`', .. })
    ));
    assert!(matches!(
        decompress_literals("\"a`b!"),
        Err(Error::InvalidEncoding { ch: '`', .. })
    ));
}

#[test]
fn test_packed_programs_are_rejected() {
    let packed = pack("1234567").unwrap();
    assert_eq!(compress_literals(&packed), Err(Error::AlreadyPacked));
    assert_eq!(decompress_literals(&packed), Err(Error::AlreadyPacked));
}

#[test]
fn test_options_select_rewrites() {
    let table = HuffmanTable::english().unwrap();
    let source = "\"hello world\"1234567z1+2+3+";

    let all = compress_literals_with(source, table, LiteralOptions::new()).unwrap();
    assert_eq!(all, "`f}$Fb8jM!$`\"0V6Y%\"48c!");

    let none = compress_literals_with(source, table, LiteralOptions::none()).unwrap();
    assert_eq!(none, source);

    let strings = LiteralOptions::none().with_strings(true);
    assert_eq!(
        compress_literals_with(source, table, strings).unwrap(),
        "`f}$Fb8jM!$`1234567z1+2+3+"
    );

    let sequences = LiteralOptions::none().with_sequences(true);
    assert_eq!(
        compress_literals_with(source, table, sequences).unwrap(),
        "\"hello world\"1234567\"48c!"
    );

    let integers = LiteralOptions::none().with_integers(true);
    assert_eq!(
        compress_literals_with(source, table, integers).unwrap(),
        "\"hello world\"\"0V6Y%z1+2+3+"
    );
}

#[test]
fn test_roundtrip_mixed_program() {
    let source = "\"the quick brown fox\"{zA+20+30+40+m}1000000000 2+\tnote\n\"ok\"";
    let compressed = compress_literals(source).unwrap();
    assert!(compressed.len() < source.len());
    assert_eq!(decompress_literals(&compressed).unwrap(), source);
}

#[test]
fn test_decompress_with_cache() {
    let table = HuffmanTable::english().unwrap();
    let cache = DecompressCache::new();
    let compressed = compress_literals("\"hello world\"\"hello world\"").unwrap();
    let restored = decompress_literals_with(&compressed, table, Some(&cache)).unwrap();
    assert_eq!(restored, "\"hello world\"\"hello world\"");
    assert_eq!(cache.len(), 1);
}
