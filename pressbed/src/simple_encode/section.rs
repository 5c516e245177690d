use std::io;

use crate::{
    pdf::{
        trailer::{Trailer, TRAILER},
        xref::{FreeObject, UsedObject, Xref, XrefEntry},
        Dictionary,
    },
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

const XREF: &[u8] = b"xref";
const START_XREF: &[u8] = b"startxref";
const EOF_MARKER: &[u8] = b"%%EOF";

/// `%PDF-x.y` followed by a comment with high bytes, marking the file as
/// binary.
pub fn write_header(version: (u8, u8), writer: &mut dyn Writer) -> io::Result<()> {
    writer.write(format!("%PDF-{}.{}\n", version.0, version.1).as_bytes())?;
    writer.write(b"%\xFF\xFF\xFF\xFF\n")
}

impl Encoder<Xref> for SimpleEncoder {
    /// Classic table with a single subsection. Every entry is exactly 20
    /// bytes.
    fn write_to(o: &Xref, writer: &mut dyn Writer) -> io::Result<()> {
        log::trace!("write XRef");

        writer.write(XREF)?;
        writer.write(format!("\n0 {}\n", o.len()).as_bytes())?;
        for entry in o.entries() {
            let line = match entry {
                XrefEntry::Free(FreeObject {
                    generation, next_free, ..
                }) => format!("{:010} {:05} f \n", next_free, generation),
                XrefEntry::Used(UsedObject {
                    byte_offset,
                    generation,
                    ..
                }) => format!("{:010} {:05} n \n", byte_offset, generation),
            };
            writer.write(line.as_bytes())?;
        }
        Ok(())
    }
}

impl Encoder<Trailer> for SimpleEncoder {
    fn write_to(trailer: &Trailer, writer: &mut dyn Writer) -> io::Result<()> {
        log::trace!("write Trailer");

        let trailer_dict: Dictionary = trailer.clone().into();
        writer.write(TRAILER)?;
        writer.write(b"\n")?;
        Self::write_to(&trailer_dict, writer)?;
        writer.write(b"\n")
    }
}

/// Everything after the body: xref table, trailer, `startxref` and the end
/// marker. Returns the offset of the xref table.
pub fn write_tail(xref: &Xref, trailer: &Trailer, writer: &mut dyn Writer) -> io::Result<usize> {
    let start_xref = writer.position();
    SimpleEncoder::write_to(xref, writer)?;
    SimpleEncoder::write_to(trailer, writer)?;

    writer.write(START_XREF)?;
    writer.write(b"\n")?;
    writer.write(start_xref.to_string().as_bytes())?;
    writer.write(b"\n")?;
    writer.write(EOF_MARKER)?;
    writer.write(b"\n")?;
    Ok(start_xref)
}
