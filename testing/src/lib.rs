//! # Checklist Testing
//!
//! Testing utilities and helpers for the Checklist architecture.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - Property-based testing strategies for text input
//!
//! ## Example
//!
//! ```ignore
//! use checklist_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::default())
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::AddTodo { title: "Buy milk".into(), subtitle: "2%".into() })
//!     .then_effects(|effects| {
//!         assertions::assert_sends_one(effects, |action| matches!(action, TodoAction::TodoAdded { .. }))
//!     })
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Property-based testing strategies using proptest.
///
/// Lengths are measured in characters, not bytes; the generated text mixes
/// ASCII with multi-byte characters so the two never coincide by accident.
/// Every generated character lies in the Basic Multilingual Plane, so the
/// character count also equals the UTF-16 length.
pub mod properties {
    use proptest::prelude::*;
    use std::ops::RangeInclusive;

    fn text_char() -> impl Strategy<Value = char> {
        prop_oneof![
            4 => prop::char::range('a', 'z'),
            2 => prop::char::range('A', 'Z'),
            1 => prop::char::range('0', '9'),
            2 => Just(' '),
            1 => Just('é'),
            1 => Just('日'),
            1 => Just('%'),
        ]
    }

    fn whitespace_char() -> impl Strategy<Value = char> {
        prop_oneof![Just(' '), Just('\t'), Just('\n'), Just('\u{3000}')]
    }

    /// Text with a character count in `len` containing at least one
    /// non-whitespace character
    ///
    /// `len` must not start at zero; empty text is always blank.
    pub fn non_blank_text(len: RangeInclusive<usize>) -> impl Strategy<Value = String> {
        let min = (*len.start()).max(1);
        prop::collection::vec(text_char(), min..=*len.end())
            .prop_map(|chars| chars.into_iter().collect::<String>())
            .prop_filter("text must not be blank", |text| !text.trim().is_empty())
    }

    /// Whitespace-only text (including the empty string) of at most `max_len`
    /// characters
    pub fn blank_text(max_len: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(whitespace_char(), 0..=max_len)
            .prop_map(|chars| chars.into_iter().collect())
    }

    /// Any text, blank or not, with a character count in `len`
    pub fn any_text(len: RangeInclusive<usize>) -> impl Strategy<Value = String> {
        prop::collection::vec(prop_oneof![3 => text_char(), 1 => whitespace_char()], len)
            .prop_map(|chars| chars.into_iter().collect())
    }
}
