//! The `META` column codec.
//!
//! A meta string is an unordered set of single-character tokens:
//!
//! | token | meaning                                   |
//! |-------|-------------------------------------------|
//! | `-`   | row is unused and dropped on read         |
//! | `#`   | row is a comment                          |
//! | `a`   | row is an array item (or array comment)  |
//! | `f`   | resource carries `formatted="false"`      |
//! | `t`   | resource carries `translatable="false"`   |
//!
//! Decoding tests for token membership, so order and duplicates do not matter.
//! Encoding always writes tokens in the order `a`, `#`, `f`, `t`.

use serde::{Deserialize, Serialize};

pub const UNUSED: char = '-';
pub const COMMENT: char = '#';
pub const ARRAY: char = 'a';
pub const NOT_FORMATTED: char = 'f';
pub const NOT_TRANSLATABLE: char = 't';

/// Role and attribute flags of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flags {
    pub comment: bool,
    pub array_item: bool,
    pub formatted: bool,
    pub translatable: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            comment: false,
            array_item: false,
            formatted: true,
            translatable: true,
        }
    }
}

impl Flags {
    pub fn comment() -> Self {
        Self {
            comment: true,
            ..Self::default()
        }
    }

    pub fn array_item() -> Self {
        Self {
            array_item: true,
            ..Self::default()
        }
    }

    pub fn with_formatted(mut self, formatted: bool) -> Self {
        self.formatted = formatted;
        self
    }

    pub fn with_translatable(mut self, translatable: bool) -> Self {
        self.translatable = translatable;
        self
    }
}

/// A decoded `META` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Meta {
    pub unused: bool,
    pub flags: Flags,
}

/// Encodes flags into the canonical token string.
///
/// Attribute tokens are only meaningful for resources, so a comment encodes
/// to `#` or `a#` regardless of its attribute flags.
pub fn encode(flags: &Flags) -> String {
    let mut out = String::with_capacity(4);
    if flags.array_item {
        out.push(ARRAY);
    }
    if flags.comment {
        out.push(COMMENT);
        return out;
    }
    if !flags.formatted {
        out.push(NOT_FORMATTED);
    }
    if !flags.translatable {
        out.push(NOT_TRANSLATABLE);
    }
    out
}

/// Decodes a token string. Unknown characters are ignored.
pub fn decode(meta: &str) -> Meta {
    let comment = meta.contains(COMMENT);
    Meta {
        unused: meta.contains(UNUSED),
        flags: Flags {
            comment,
            array_item: meta.contains(ARRAY),
            formatted: comment || !meta.contains(NOT_FORMATTED),
            translatable: comment || !meta.contains(NOT_TRANSLATABLE),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_default_is_empty() {
        assert_eq!(encode(&Flags::default()), "");
    }

    #[test]
    fn test_encode_fixed_order() {
        let flags = Flags::array_item()
            .with_formatted(false)
            .with_translatable(false);
        assert_eq!(encode(&flags), "aft");
        assert_eq!(encode(&Flags::comment()), "#");
        let array_comment = Flags {
            array_item: true,
            ..Flags::comment()
        };
        assert_eq!(encode(&array_comment), "a#");
    }

    #[test]
    fn test_decode_ignores_order_and_duplicates() {
        assert_eq!(decode("tfa"), decode("aft"));
        assert_eq!(decode("ttaa"), decode("at"));
        let meta = decode("ta");
        assert!(meta.flags.array_item);
        assert!(!meta.flags.translatable);
        assert!(meta.flags.formatted);
        assert!(!meta.unused);
    }

    #[test]
    fn test_decode_unused() {
        assert!(decode("-").unused);
        assert!(decode("a-t").unused);
        assert!(!decode("").unused);
    }

    #[test]
    fn test_decode_comment_has_no_attribute_semantics() {
        let meta = decode("#ft");
        assert!(meta.flags.comment);
        assert!(meta.flags.formatted);
        assert!(meta.flags.translatable);
    }

    #[test]
    fn test_decode_array_comment() {
        let meta = decode("a#");
        assert!(meta.flags.comment);
        assert!(meta.flags.array_item);
    }

    fn flags_strategy() -> impl Strategy<Value = Flags> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(comment, array_item, formatted, translatable)| {
                if comment {
                    Flags {
                        array_item,
                        ..Flags::comment()
                    }
                } else {
                    Flags {
                        comment,
                        array_item,
                        formatted,
                        translatable,
                    }
                }
            },
        )
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(flags in flags_strategy()) {
            let meta = decode(&encode(&flags));
            prop_assert!(!meta.unused);
            prop_assert_eq!(meta.flags, flags);
        }

        #[test]
        fn prop_encode_is_idempotent(raw in "[-#aft]{0,8}") {
            let once = encode(&decode(&raw).flags);
            let twice = encode(&decode(&once).flags);
            prop_assert_eq!(once, twice);
        }
    }
}
