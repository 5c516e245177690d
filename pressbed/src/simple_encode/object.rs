use std::io;

use crate::{
    pdf::{Object, Reference},
    writer::{Encoder, Writer},
};

use super::SimpleEncoder;

pub use self::indirect::Indirect;

pub(crate) mod array;
pub(crate) mod dictionary;
pub(crate) mod indirect;
pub(crate) mod name;
pub(crate) mod stream;
pub(crate) mod string;

pub(crate) const TRUE_OBJECT: &str = "true";
pub(crate) const FALSE_OBJECT: &str = "false";
pub(crate) const NULL_OBJECT: &str = "null";

impl Encoder<Object> for SimpleEncoder {
    fn write_to(obj: &Object, writer: &mut dyn Writer) -> io::Result<()> {
        match obj {
            Object::String(str) => Self::write_to(str, writer),
            Object::HexString(bytes) => {
                writer.write(b"<")?;
                writer.write(hex::encode_upper(&bytes[..]).as_bytes())?;
                writer.write(b">")
            }
            Object::Float(f) => write_float(*f, writer),
            Object::Integer(i) => writer.write(i.to_string().as_bytes()),
            Object::Bool(true) => writer.write(TRUE_OBJECT.as_bytes()),
            Object::Bool(false) => writer.write(FALSE_OBJECT.as_bytes()),
            Object::Name(n) => Self::write_to(n, writer),
            Object::Array(a) => Self::write_to(a, writer),
            Object::Dictionary(d) => Self::write_to(d, writer),
            Object::Stream(s) => Self::write_to(s, writer),
            Object::Null => writer.write(NULL_OBJECT.as_bytes()),
            Object::Reference(r) => Self::write_to(r, writer),
        }
    }
}

impl Encoder<Reference> for SimpleEncoder {
    fn write_to(r: &Reference, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(r.index.to_string().as_bytes())?;
        writer.write(b" ")?;
        writer.write(r.generation.to_string().as_bytes())?;
        writer.write(b" R")
    }
}

/// Reals have no exponent form in PDF. Non-finite values become 0.
fn write_float(f: f32, writer: &mut dyn Writer) -> io::Result<()> {
    if !f.is_finite() {
        return writer.write(b"0");
    }
    if f == f.trunc() && f.abs() < 1e9 {
        return writer.write((f as i64).to_string().as_bytes());
    }
    let formatted = format!("{:.5}", f);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    writer.write(trimmed.as_bytes())
}

#[cfg(test)]
mod tests {
    use crate::pdf::{Bytes, Name};

    use super::*;

    fn encode(o: &Object) -> String {
        let mut out = Vec::new();
        SimpleEncoder::write_to(o, &mut out).unwrap();
        assert_eq!(out.len(), SimpleEncoder::encoded_len(o));
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(encode(&Object::Integer(-42)), "-42");
        assert_eq!(encode(&Object::Bool(true)), "true");
        assert_eq!(encode(&Object::Bool(false)), "false");
        assert_eq!(encode(&Object::Null), "null");
        assert_eq!(encode(&Object::Reference(Reference::new(12, 0))), "12 0 R");
        assert_eq!(encode(&Object::HexString(Bytes::from(vec![0x00, 0xab, 0xff]))), "<00ABFF>");
        assert_eq!(encode(&Object::Name(Name::from("Type"))), "/Type");
    }

    #[test]
    fn floats() {
        assert_eq!(encode(&Object::Float(612.0)), "612");
        assert_eq!(encode(&Object::Float(0.5)), "0.5");
        assert_eq!(encode(&Object::Float(-1.25)), "-1.25");
        assert_eq!(encode(&Object::Float(f32::NAN)), "0");
        assert_eq!(encode(&Object::Float(1e10)), "10000000000");
    }
}
