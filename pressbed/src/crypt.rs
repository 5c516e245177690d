//! RC4 object encryption.
//!
//! Every string and stream of an indirect object is encrypted with a key
//! derived from the document key and the object's reference. Deriving the
//! document key from passwords is left to the caller.

use std::io;

use crate::pdf::{Array, Bytes, Dictionary, Object, PdfString, Reference, Stream};

/// Longest document key that still contributes to the per-object key.
pub const MAX_KEY_LEN: usize = 16;

/// The document encryption key.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey(Vec<u8>);

impl EncryptionKey {
    /// `None` if `key` is empty or longer than [`MAX_KEY_LEN`].
    pub fn new(key: impl Into<Vec<u8>>) -> Option<Self> {
        let key = key.into();
        if key.is_empty() || key.len() > MAX_KEY_LEN {
            return None;
        }
        Some(Self(key))
    }

    /// Parse a key given as hex digits.
    pub fn from_hex(hex_key: &str) -> Option<Self> {
        hex::decode(hex_key).ok().and_then(Self::new)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The RC4 key for the object stored under `reference`: MD5 of the
    /// document key, the low three bytes of the object number and the low
    /// two bytes of the generation, truncated to `len + 5` bytes (at most 16).
    pub fn object_key(&self, reference: Reference) -> Vec<u8> {
        let mut key_data = self.0.clone();
        key_data.extend_from_slice(&reference.index.to_le_bytes()[..3]);
        key_data.extend_from_slice(&reference.generation.to_le_bytes());

        let hash = md5::compute(&key_data);
        let key_len = (self.0.len() + 5).min(16);
        hash.0[..key_len].to_vec()
    }

    /// Encrypt all strings and stream data inside `object`. External stream
    /// data is read into memory first.
    pub fn encrypt_object(&self, reference: Reference, object: &Object) -> io::Result<Object> {
        encrypt(object, &self.object_key(reference))
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EncryptionKey").field(&self.0.len()).finish()
    }
}

fn encrypt(object: &Object, key: &[u8]) -> io::Result<Object> {
    let rc4 = |data: &[u8]| -> io::Result<Vec<u8>> {
        let mut cipher = Arcfour::new(key)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid RC4 key length"))?;
        Ok(cipher.apply(data))
    };

    Ok(match object {
        Object::String(s) => Object::String(PdfString::from(rc4(&s[..])?)),
        Object::HexString(b) => Object::HexString(Bytes::from(rc4(&b[..])?)),
        Object::Array(a) => {
            let items = a.iter().map(|o| encrypt(o, key)).collect::<io::Result<Vec<_>>>()?;
            Object::Array(Array::from(items))
        }
        Object::Dictionary(d) => Object::Dictionary(encrypt_dictionary(d, key)?),
        Object::Stream(s) => {
            let data = s.raw_data()?;
            let dictionary = encrypt_dictionary(&s.dictionary, key)?;
            Object::Stream(Stream::new(dictionary, rc4(&data[..])?))
        }
        other => other.clone(),
    })
}

fn encrypt_dictionary(d: &Dictionary, key: &[u8]) -> io::Result<Dictionary> {
    d.iter()
        .map(|(k, v)| -> io::Result<_> { Ok((k.clone(), encrypt(v, key)?)) })
        .collect()
}

/// RC4 keys are 1 to 256 bytes long.
pub const RC4_KEY_LEN: std::ops::RangeInclusive<usize> = 1..=256;

/// RC4 keystream. Encrypting and decrypting are the same operation.
pub struct Arcfour {
    s: [u8; 256],
    x: u8,
    y: u8,
}

impl Arcfour {
    /// `None` if the key length is outside [`RC4_KEY_LEN`].
    pub fn new(key: &[u8]) -> Option<Self> {
        if !RC4_KEY_LEN.contains(&key.len()) {
            return None;
        }

        let mut s = [0u8; 256];
        for (i, v) in s.iter_mut().enumerate() {
            *v = i as u8;
        }
        let mut y = 0u8;
        for (x, k) in (0..256).zip(key.iter().cycle()) {
            y = y.wrapping_add(s[x]).wrapping_add(*k);
            s.swap(x, usize::from(y));
        }

        Some(Self { s, x: 0, y: 0 })
    }

    /// XOR `data` with the next bytes of the keystream.
    pub fn apply(&mut self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .map(|byte| {
                self.x = self.x.wrapping_add(1);
                self.y = self.y.wrapping_add(self.s[usize::from(self.x)]);
                self.s.swap(usize::from(self.x), usize::from(self.y));
                let k = self.s[usize::from(self.x)].wrapping_add(self.s[usize::from(self.y)]);
                byte ^ self.s[usize::from(k)]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::pdf::{dictionary, Name};

    use super::*;

    #[test]
    fn rc4_known_answer() {
        let out = Arcfour::new(b"Key").unwrap().apply(b"Plaintext");
        assert_eq!(out, hex::decode("bbf316e8d940af0ad3").unwrap());
        assert_eq!(Arcfour::new(b"Key").unwrap().apply(&out), b"Plaintext");

        // the keystream continues across calls
        let mut cipher = Arcfour::new(b"Key").unwrap();
        let mut split = cipher.apply(b"Plain");
        split.extend(cipher.apply(b"text"));
        assert_eq!(split, out);
    }

    #[test]
    fn rc4_key_length() {
        assert!(Arcfour::new(b"").is_none());
        assert!(Arcfour::new(&[1; 257]).is_none());
        assert!(Arcfour::new(&[1; 256]).is_some());
    }

    #[test]
    fn key_bounds() {
        assert!(EncryptionKey::new(Vec::new()).is_none());
        assert!(EncryptionKey::new(vec![1; 17]).is_none());
        assert!(EncryptionKey::new(vec![1; 16]).is_some());
        assert_eq!(EncryptionKey::from_hex("0102ff").unwrap().as_bytes(), &[1, 2, 0xff]);
        assert!(EncryptionKey::from_hex("xyz").is_none());
    }

    #[test]
    fn object_key_depends_on_reference() {
        let key = EncryptionKey::new(b"secret".to_vec()).unwrap();
        let a = key.object_key(Reference::new(4, 0));
        let b = key.object_key(Reference::new(5, 0));
        assert_eq!(a.len(), 11);
        assert_ne!(a, b);

        let long = EncryptionKey::new(vec![7; 16]).unwrap();
        assert_eq!(long.object_key(Reference::new(1, 0)).len(), 16);
    }

    #[test]
    fn strings_and_streams_are_encrypted() {
        let key = EncryptionKey::new(b"secret".to_vec()).unwrap();
        let reference = Reference::new(7, 0);
        let object = Object::Dictionary(dictionary([
            (b"Title".as_slice(), Object::String(PdfString::from("hello"))),
            (b"Type".as_slice(), Object::Name(Name::from("Info"))),
            (b"Count".as_slice(), Object::Integer(3)),
        ]));

        let encrypted = key.encrypt_object(reference, &object).unwrap();
        let d = encrypted.dictionary().unwrap();
        let plain = object.dictionary().unwrap();
        assert_ne!(d.get(b"Title".as_slice()), plain.get(b"Title".as_slice()));
        assert_eq!(d.get(b"Type".as_slice()), Some(&Object::Name(Name::from("Info"))));
        assert_eq!(d.get(b"Count".as_slice()), Some(&Object::Integer(3)));

        // applying the same key again restores the plain object
        assert_eq!(key.encrypt_object(reference, &encrypted).unwrap(), object);

        let stream = Object::Stream(Stream::new(Dictionary::default(), b"BT ET".to_vec()));
        let encrypted = key.encrypt_object(reference, &stream).unwrap();
        assert_eq!(encrypted.stream().unwrap().len(), 5);
        assert_ne!(encrypted, stream);
    }
}
