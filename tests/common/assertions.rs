//! Assertions that log both sides before comparing.
//!
//! When a test fails in CI the tracing output shows the values next to the
//! panic, which matters for strings full of `§` codes.

#![allow(dead_code)]

use std::fmt::Debug;

/// Assert equality, logging both values first.
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );
}

#[track_caller]
pub fn assert_true_logged(context: &str, value: bool) {
    tracing::debug!(context = context, value = value, "asserting true");
    if !value {
        tracing::error!(context = context, "assertion failed: expected true");
    }
    assert!(value, "{context}: expected true, got false");
}

/// Assert a `Result` is `Ok` and hand back the value.
#[track_caller]
pub fn assert_ok_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => {
            tracing::debug!(context = context, value = ?value, "result is Ok");
            value
        }
        Err(err) => {
            tracing::error!(context = context, error = ?err, "assertion failed: expected Ok");
            panic!("{context}: expected Ok, got Err({err:?})");
        }
    }
}

/// Assert a `Result` is `Err` and hand back the error.
#[track_caller]
pub fn assert_err_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> E {
    match result {
        Err(err) => {
            tracing::debug!(context = context, error = ?err, "result is Err");
            err
        }
        Ok(value) => {
            tracing::error!(context = context, value = ?value, "assertion failed: expected Err");
            panic!("{context}: expected Err, got Ok({value:?})");
        }
    }
}

#[track_caller]
pub fn assert_contains_logged(context: &str, haystack: &str, needle: &str) {
    tracing::debug!(
        context = context,
        haystack = haystack,
        needle = needle,
        "asserting contains"
    );
    if !haystack.contains(needle) {
        tracing::error!(
            context = context,
            haystack = haystack,
            needle = needle,
            "assertion failed: substring not found"
        );
    }
    assert!(
        haystack.contains(needle),
        "{context}: {haystack:?} does not contain {needle:?}"
    );
}
