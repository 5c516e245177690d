use super::{Dictionary, Name, Object, Reference};

pub const TRAILER: &[u8] = b"trailer";
pub const K_SIZE: &[u8] = b"Size";
pub const K_ROOT: &[u8] = b"Root";
pub const K_INFO: &[u8] = b"Info";

#[derive(Debug, Clone, PartialEq)]
pub struct Trailer {
    /// Highest object number used in the PDF document plus one
    pub size: usize,

    /// Reference to the root object.
    pub root: Reference,

    /// Information for this document.
    pub info: Option<Reference>,

    /// Further entries, e.g. `/Encrypt` or `/ID`. They cannot override the
    /// entries above.
    pub extra: Dictionary,
}

impl From<Trailer> for Dictionary {
    fn from(trailer: Trailer) -> Self {
        let mut dict =
            Dictionary::with_capacity_and_hasher(3 + trailer.extra.len(), Default::default());
        dict.insert(
            Name::from(K_SIZE),
            Object::Integer(i64::try_from(trailer.size).unwrap_or(i64::MAX)),
        );
        dict.insert(Name::from(K_ROOT), Object::Reference(trailer.root));
        if let Some(info) = trailer.info {
            dict.insert(Name::from(K_INFO), Object::Reference(info));
        }

        for (k, v) in trailer.extra {
            if !dict.contains_key(&k) {
                dict.insert(k, v);
            }
        }

        dict
    }
}

#[cfg(test)]
mod tests {
    use crate::pdf::Bytes;

    use super::*;

    #[test]
    fn extra_entries_follow_required_ones() {
        let mut extra = Dictionary::default();
        extra.insert(Name::from("Size"), Object::Integer(1));
        extra.insert(
            Name::from("ID"),
            Object::from(vec![
                Object::HexString(Bytes::from(vec![1, 2])),
                Object::HexString(Bytes::from(vec![1, 2])),
            ]),
        );

        let dict = Dictionary::from(Trailer {
            size: 7,
            root: Reference::new(3, 0),
            info: Some(Reference::new(1, 0)),
            extra,
        });

        let keys: Vec<String> = dict.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["Size", "Root", "Info", "ID"]);
        assert_eq!(dict.get(K_SIZE), Some(&Object::Integer(7)));
    }
}
