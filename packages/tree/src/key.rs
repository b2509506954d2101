use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a node within a tree.
///
/// Keys handed out by the [`KeyAllocator`](crate::KeyAllocator) are always
/// integers. String keys only appear in trees loaded from outside the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(u64),
    Str(String),
}

impl Key {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Key::Int(value) => Some(*value),
            Key::Str(_) => None,
        }
    }

    /// Allocator slot this key occupies.
    ///
    /// A string spelled like a generated class (`"n7"`) takes the slot of the
    /// integer it would be generated from, so `7` and `"n7"` never coexist.
    pub fn slot(&self) -> Option<u64> {
        match self {
            Key::Int(value) => Some(*value),
            Key::Str(value) => {
                let digits = value.strip_prefix('n')?;
                let number: u64 = digits.parse().ok()?;
                (number.to_string() == digits).then_some(number)
            }
        }
    }

    /// Class name generated for nodes that have no explicit class.
    ///
    /// Integer keys get an `n` prefix since a selector can't start with a
    /// digit. String keys are kept as-is when they are already a plain
    /// identifier; any other character (a leading digit or `-`, `_`,
    /// whitespace, punctuation) is written as `_<hex code point>_`.
    ///
    /// Two keys share a class name only if they share a [`slot`](Key::slot).
    pub fn class_name(&self) -> String {
        match self {
            Key::Int(value) => format!("n{}", value),
            Key::Str(value) if value.is_empty() => "_".to_string(),
            Key::Str(value) => {
                let mut out = String::with_capacity(value.len());
                for (index, ch) in value.chars().enumerate() {
                    let plain = ch.is_ascii_alphabetic()
                        || (index > 0 && (ch.is_ascii_digit() || ch == '-'));
                    if plain {
                        out.push(ch);
                    } else {
                        out.push_str(&format!("_{:x}_", ch as u32));
                    }
                }
                out
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(value) => write!(f, "{}", value),
            Key::Str(value) => f.write_str(value),
        }
    }
}

impl From<u64> for Key {
    fn from(value: u64) -> Self {
        Key::Int(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name() {
        assert_eq!(Key::Int(7).class_name(), "n7");
        assert_eq!(Key::from("n7").class_name(), "n7");
        assert_eq!(Key::from("hero").class_name(), "hero");
        assert_eq!(Key::from("card-2").class_name(), "card-2");
    }

    #[test]
    fn test_class_name_escapes_non_identifiers() {
        assert_eq!(Key::from("5").class_name(), "_35_");
        assert_eq!(Key::from("a b").class_name(), "a_20_b");
        assert_eq!(Key::from("-x").class_name(), "_2d_x");
        assert_eq!(Key::from("a_b").class_name(), "a_5f_b");
        assert_eq!(Key::from("").class_name(), "_");
    }

    #[test]
    fn test_class_names_only_clash_on_shared_slot() {
        let keys = [
            Key::Int(7),
            Key::Int(70),
            Key::from("n07"),
            Key::from("a b"),
            Key::from("a_20_b"),
            Key::from("5"),
            Key::from("_35_"),
            Key::from(""),
            Key::from("_"),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a.class_name(), b.class_name(), "{:?} vs {:?}", a, b);
            }
        }

        assert_eq!(Key::Int(7).class_name(), Key::from("n7").class_name());
        assert_eq!(Key::Int(7).slot(), Key::from("n7").slot());
    }

    #[test]
    fn test_slot() {
        assert_eq!(Key::Int(3).slot(), Some(3));
        assert_eq!(Key::from("n3").slot(), Some(3));
        assert_eq!(Key::from("n0").slot(), Some(0));
        assert_eq!(Key::from("n03").slot(), None);
        assert_eq!(Key::from("n+3").slot(), None);
        assert_eq!(Key::from("n").slot(), None);
        assert_eq!(Key::from("hero").slot(), None);
    }

    #[test]
    fn test_untagged_serialization() {
        let keys: Vec<Key> = serde_json::from_str(r#"[3, "n7"]"#).unwrap();
        assert_eq!(keys, vec![Key::Int(3), Key::Str("n7".to_string())]);
        assert_eq!(serde_json::to_string(&keys).unwrap(), r#"[3,"n7"]"#);
    }
}
