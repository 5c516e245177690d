use std::{fs::File, io};

use crate::{
    pdf::{Stream, StreamData},
    simple_encode::SimpleEncoder,
    writer::{copy_exact, Encoder, Writer},
};

pub(crate) const START_STREAM: &[u8] = b"stream\n";
pub(crate) const END_STREAM: &[u8] = b"\nendstream";

/// Dictionary and `stream` keyword, everything before the data.
pub(crate) fn write_head(s: &Stream, writer: &mut dyn Writer) -> io::Result<()> {
    SimpleEncoder::write_to(&s.dictionary_with_length(), writer)?;
    writer.write(b" ")?;
    writer.write(START_STREAM)
}

impl Encoder<Stream> for SimpleEncoder {
    fn write_to(s: &Stream, writer: &mut dyn Writer) -> io::Result<()> {
        write_head(s, writer)?;
        match &s.data {
            StreamData::Inline(data) => writer.write(data)?,
            StreamData::External { path, length } => {
                copy_exact(&mut File::open(path)?, writer, *length)?;
            }
        }
        writer.write(END_STREAM)
    }
}
