// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::EntryKind;

/// Validation failures raised at the write boundary. Reads never produce these;
/// rows that would fail are skipped and reported instead.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Unknown entry kind '{0}', expected income|expense|savings")]
    UnknownKind(String),

    #[error("Unknown account type '{0}', expected cash|card|bank|other")]
    UnknownAccountType(String),

    #[error("Amount must be zero or greater, got {0}")]
    NegativeAmount(Decimal),

    #[error("Memo is {len} characters, the limit is {max}")]
    MemoTooLong { len: usize, max: usize },

    #[error("Category '{name}' is for {actual} entries, not {expected}")]
    KindMismatch {
        name: String,
        expected: EntryKind,
        actual: EntryKind,
    },

    #[error("{what} '{name}' is archived")]
    Archived { what: &'static str, name: String },

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Invalid reminder time '{0}', expected HH:MM")]
    InvalidReminderTime(String),
}
