use std::io;

use crate::{
    pdf::Dictionary,
    simple_encode::SimpleEncoder,
    writer::{Encoder, Writer},
};

impl Encoder<Dictionary> for SimpleEncoder {
    fn write_to(o: &Dictionary, writer: &mut dyn Writer) -> io::Result<()> {
        writer.write(b"<<")?;
        let mut is_first = true;
        for (key, value) in o.iter() {
            if !is_first {
                writer.write(b" ")?;
            }
            Self::write_to(key, writer)?;
            writer.write(b" ")?;
            Self::write_to(value, writer)?;
            is_first = false
        }
        writer.write(b">>")
    }
}
