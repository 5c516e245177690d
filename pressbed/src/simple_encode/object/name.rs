use std::io;

use crate::{
    pdf::Name,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

fn is_delimiter(chr: u8) -> bool {
    matches!(
        chr,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Characters that can appear in a name without `#xx` escaping.
pub(crate) fn is_regular(chr: u8) -> bool {
    (b'!'..=b'~').contains(&chr) && chr != b'#' && !is_delimiter(chr)
}

impl Encoder<Name> for SimpleEncoder {
    fn write_to(n: &Name, writer: &mut dyn Writer) -> io::Result<()> {
        let mut last_write = 0;
        writer.write(b"/")?;
        for (index, &c) in n.iter().enumerate() {
            if !is_regular(c) {
                writer.write(&n[last_write..index])?;
                last_write = index + 1;
                writer.write(b"#")?;
                writer.write(hex::encode_upper([c]).as_bytes())?;
            }
        }
        writer.write(&n[last_write..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &[u8], expected: &[u8]) {
        let name = Name::from(name.to_vec());
        let encoded_len = SimpleEncoder::encoded_len(&name);
        let mut out = Vec::new();
        SimpleEncoder::write_to(&name, &mut out).unwrap();
        assert_eq!(
            out,
            expected,
            "Expected {}, got {}",
            String::from_utf8_lossy(expected),
            String::from_utf8_lossy(&out)
        );
        assert_eq!(encoded_len, out.len());
    }

    #[test]
    fn delimiter_in_the_middle() {
        check(b"Hello World!", b"/Hello#20World!");
    }

    #[test]
    fn delimiter_start() {
        check(b" HelloWorld!", b"/#20HelloWorld!");
    }

    #[test]
    fn delimiter_end() {
        check(b"HelloWorld! ", b"/HelloWorld!#20");
    }

    #[test]
    fn only_delimiters() {
        check(b"   ", b"/#20#20#20");
    }

    #[test]
    fn no_delimiters() {
        check(b"HelloWorld!", b"/HelloWorld!");
    }

    #[test]
    fn number_sign_and_slash() {
        check(b"A#B/C", b"/A#23B#2FC");
    }
}
