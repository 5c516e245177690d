use std::io;

use crate::{
    pdf::PdfString,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

/// Positions of parentheses without a partner. Balanced pairs may stay
/// unescaped, everything else would end or corrupt the string.
fn unbalanced_parenthesis(str: &[u8]) -> Vec<bool> {
    let mut escape = vec![false; str.len()];
    let mut open = Vec::new();
    for (index, char) in str.iter().enumerate() {
        match char {
            b'(' => open.push(index),
            b')' => {
                if open.pop().is_none() {
                    escape[index] = true;
                }
            }
            _ => {}
        }
    }
    for index in open {
        escape[index] = true;
    }
    escape
}

impl Encoder<PdfString> for SimpleEncoder {
    fn write_to(str: &PdfString, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(b"(")?;

        let escape = unbalanced_parenthesis(str);
        let mut last_written_index = 0;
        for (index, char) in str.iter().enumerate() {
            match char {
                b'(' | b')' if escape[index] => {
                    writer.write(&str[last_written_index..index])?;
                    writer.write(br"\")?;
                    last_written_index = index;
                }
                b'\\' => {
                    writer.write(&str[last_written_index..index])?;
                    writer.write(br"\")?;
                    last_written_index = index;
                }
                // a bare CR would be read back as a line feed
                b'\r' => {
                    writer.write(&str[last_written_index..index])?;
                    writer.write(br"\r")?;
                    last_written_index = index + 1;
                }
                // skip all others.
                _ => {}
            }
        }
        writer.write(&str[last_written_index..])?;
        writer.write(b")")
    }
}
