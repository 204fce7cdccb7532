use std::num::NonZeroUsize;

use md5sum::utils::md5::{compute, compute_md5, compute_md5_with_block_size, BLOCK_SIZE};

use crate::common::{self, Fixtures, ABC_MD5, BLOCK, EMPTY_MD5};

fn block(size: usize) -> NonZeroUsize {
    NonZeroUsize::new(size).unwrap()
}

#[test]
fn test_compute_md5_when_abc_expect_known_digest() {
    let fixtures = Fixtures::new();
    let path = fixtures.file("abc.txt", b"abc");
    let actual = compute_md5(&path).unwrap();
    assert_eq!(actual, ABC_MD5);
}

#[test]
fn test_compute_md5_when_sentence_expect_known_digest() {
    let fixtures = Fixtures::new();
    let path = fixtures.file(
        "fox.txt",
        b"The quick brown fox jumps over the lazy dog",
    );
    let actual = compute_md5(&path).unwrap();
    assert_eq!(actual, "9e107d9d372bb6826bd81d3542a419d6");
}

#[test]
fn test_compute_md5_when_empty_expect_empty_digest() {
    let fixtures = Fixtures::new();
    let path = fixtures.file("empty", b"");
    let actual = compute_md5(&path).unwrap();
    assert_eq!(actual, EMPTY_MD5);
}

#[test]
fn test_compute_md5_when_exactly_one_block_expect_known_digest() {
    let fixtures = Fixtures::new();
    let path = fixtures.file("one_block.bin", &common::pattern(BLOCK));
    let actual = compute_md5(&path).unwrap();
    assert_eq!(actual, "8f293a2f6c19b345152f7a49bb4c643c");
}

#[test]
fn test_compute_md5_when_one_byte_over_block_expect_known_digest() {
    let fixtures = Fixtures::new();
    let path = fixtures.file("block_plus_one.bin", &common::pattern(BLOCK + 1));
    let actual = compute_md5(&path).unwrap();
    assert_eq!(actual, "79b67c7fbf43b76e5b7f182328bdc4b6");
}

#[test]
fn test_compute_md5_when_several_blocks_expect_known_digest() {
    let fixtures = Fixtures::new();
    let path = fixtures.file("blocks.bin", &common::pattern(3 * BLOCK + 17));
    let actual = compute_md5(&path).unwrap();
    assert_eq!(actual, "7114d559ffda7029526064baa992a30d");
}

#[test]
fn test_compute_md5_matches_in_memory_digest() {
    let fixtures = Fixtures::new();
    let data = vec![b'a'; BLOCK];
    let path = fixtures.file("a.bin", &data);
    let actual = compute_md5(&path).unwrap();
    assert_eq!(actual, compute(&data));
    assert_eq!(actual, "7202826a7791073fe2787f0c94603278");
}

#[test]
fn test_compute_md5_independent_of_block_size() {
    let fixtures = Fixtures::new();
    let path = fixtures.file("blocks.bin", &common::pattern(BLOCK + 4099));
    let expected = compute_md5(&path).unwrap();
    for size in [1_usize, 3, 4096, 65_536, BLOCK - 1, BLOCK, BLOCK + 1, 4 * BLOCK] {
        let actual = compute_md5_with_block_size(&path, block(size)).unwrap();
        assert_eq!(actual, expected, "block size {size}");
    }
}

#[test]
fn test_compute_md5_when_repeated_expect_same_digest() {
    let fixtures = Fixtures::new();
    let path = fixtures.file("repeat.bin", &common::pattern(2 * BLOCK));
    let first = compute_md5(&path).unwrap();
    for _ in 0..3 {
        assert_eq!(compute_md5(&path).unwrap(), first);
    }
}

#[test]
fn test_compute_md5_returns_lowercase_hex_of_fixed_length() {
    let fixtures = Fixtures::new();
    let path = fixtures.file("bytes.bin", &[0xff, 0x00, 0x10]);
    let actual = compute_md5(&path).unwrap();
    assert_eq!(actual.len(), 32);
    assert!(actual
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn test_block_size_constant_is_one_mebibyte() {
    assert_eq!(BLOCK_SIZE, 1_048_576);
}
