//! Maximum sizes of embed parts, in characters.

/// Title text.
pub const TITLE: usize = 256;

/// Body text.
pub const DESCRIPTION: usize = 4096;

/// Author name.
pub const AUTHOR_NAME: usize = 256;

/// Footer text.
pub const FOOTER_TEXT: usize = 2048;

/// Field heading.
pub const FIELD_NAME: usize = 256;

/// Field content.
pub const FIELD_VALUE: usize = 1024;

/// Number of fields.
pub const FIELDS: usize = 25;

/// All of the above text combined.
pub const TOTAL: usize = 6000;
