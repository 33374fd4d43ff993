//! Property-based checks for the line splitter, token search, and arena
//! checkpoint discipline.

use proptest::prelude::*;
use sourcery_core::scan::{self, LineEnding};
use sourcery_core::source::build_line_list;
use sourcery_core::Arena;

proptest! {
    /// Splitting an LF buffer agrees with the standard split on '\n',
    /// including the trailing empty line after a final newline.
    #[test]
    fn split_agrees_with_std_split(source in "([ -~]|\n){0,400}") {
        let mut arena = Arena::with_capacity(1 << 16);
        let buffer = arena.push_bytes(source.as_bytes());
        let lines = build_line_list(&mut arena, buffer, LineEnding::Lf);

        let expected: Vec<String> = source.split('\n').map(str::to_string).collect();
        let actual: Vec<String> = lines
            .iter()
            .map(|record| {
                String::from_utf8_lossy(&arena.bytes(record.text)[..record.length]).into_owned()
            })
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Line numbers are dense 0-based ordinals regardless of content.
    #[test]
    fn line_numbers_are_dense(source in "([ -~]|\n){0,200}") {
        let mut arena = Arena::with_capacity(1 << 16);
        let buffer = arena.push_bytes(source.as_bytes());
        let lines = build_line_list(&mut arena, buffer, LineEnding::Lf);
        let numbers: Vec<usize> = lines.iter().map(|record| record.line_number).collect();
        let expected: Vec<usize> = (0..numbers.len()).collect();
        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn find_token_agrees_with_str_find(hay in "[a-c]{0,64}", needle in "[a-c]{1,3}") {
        prop_assert_eq!(
            scan::find_token(hay.as_bytes(), needle.as_bytes(), 0),
            hay.find(&needle)
        );
    }

    /// A checkpoint survives any sequence of pushes made after it.
    #[test]
    fn stash_restore_roundtrip(sizes in prop::collection::vec(1usize..128, 0..16)) {
        let mut arena = Arena::with_capacity(1 << 16);
        arena.push(13);
        let before = arena.offset();
        let checkpoint = arena.stash();
        for size in sizes {
            arena.push(size);
        }
        arena.restore(checkpoint);
        prop_assert_eq!(arena.offset(), before);
    }

    /// Popping any amount never underflows the offset.
    #[test]
    fn pop_never_underflows(push in 0usize..512, pop in 0usize..2048) {
        let mut arena = Arena::with_capacity(4096);
        arena.push(push);
        arena.pop(pop);
        prop_assert!(arena.offset() <= push);
    }
}
