use std::io;

use crate::{
    pdf::{Object, Reference},
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

pub(crate) const END_OBJECT: &[u8] = b"\nendobj\n";

/// An object together with the reference it is stored under.
pub struct Indirect<'a> {
    pub reference: Reference,
    pub object: &'a Object,
}

/// `N G obj` line that opens an indirect object.
pub(crate) fn write_head(reference: Reference, writer: &mut dyn Writer) -> io::Result<()> {
    writer.write(reference.index.to_string().as_bytes())?;
    writer.write(b" ")?;
    writer.write(reference.generation.to_string().as_bytes())?;
    writer.write(b" obj\n")
}

impl Encoder<Indirect<'_>> for SimpleEncoder {
    fn write_to(o: &Indirect<'_>, writer: &mut dyn Writer) -> io::Result<()> {
        write_head(o.reference, writer)?;
        Self::write_to(o.object, writer)?;
        writer.write(END_OBJECT)
    }
}
