//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range | Domain    | Description                              |
//! |-------|-----------|------------------------------------------|
//! | 0     | Universal | Success                                  |
//! | 1     | Universal | General error (unspecified)              |
//! | 2     | Universal | CLI usage error (bad args, missing file) |
//! | 3-9   | merge     | Merge-engine-specific codes              |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Merge config failed to parse or validate.
pub const EXIT_MERGE_INVALID_CONFIG: u8 = 3;

/// Runtime failure (section file unreadable, bad OCR dump, output write).
pub const EXIT_MERGE_RUNTIME: u8 = 4;
