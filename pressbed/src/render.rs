//! Writes the body of a document: every stored object, in store order.

use std::fs::File;

use crate::{
    crypt::EncryptionKey,
    error::PbError,
    pdf::Reference,
    store::{Part, Payload, StoredObject},
    writer::{copy_exact, CopyError, Writer},
};

/// Write `objects` to `writer` in the order given and record the offset of
/// each. With a key, the encrypted form of every object is written.
///
/// Returns the number of objects written. On error the failing object has
/// no offset and the output must be discarded.
pub fn render_body<'a, O, I>(
    objects: I,
    writer: &mut dyn Writer,
    encryption: Option<&EncryptionKey>,
) -> Result<usize, PbError>
where
    O: StoredObject + 'a,
    I: IntoIterator<Item = &'a mut O>,
{
    let mut written = 0;
    for object in objects {
        object.set_offset(Some(writer.position()));
        if let Err(e) = write_object(&*object, writer, encryption) {
            log::error!("failed to write object {}: {}", object.reference(), e);
            object.set_offset(None);
            return Err(e);
        }
        written += 1;
    }
    log::debug!("wrote {} objects, body ends at {}", written, writer.position());
    Ok(written)
}

fn write_object<O: StoredObject>(
    object: &O,
    writer: &mut dyn Writer,
    encryption: Option<&EncryptionKey>,
) -> Result<(), PbError> {
    if let Some(key) = encryption {
        writer.write(&object.encrypted_object(key)?)?;
        return Ok(());
    }

    match object.object()? {
        Payload::Bytes(bytes) => writer.write(&bytes)?,
        Payload::Parts(parts) => {
            for part in parts {
                write_part(object.reference(), part, writer)?;
            }
        }
    }
    Ok(())
}

/// External parts must hold exactly the declared number of bytes, the
/// `/Length` written before them depends on it.
fn write_part(reference: Reference, part: Part, writer: &mut dyn Writer) -> Result<(), PbError> {
    match part {
        Part::Inline(bytes) => writer.write(&bytes)?,
        Part::External { path, length } => {
            let copied = File::open(&path)
                .map_err(CopyError::Read)
                .and_then(|mut file| copy_exact(&mut file, writer, length));
            match copied {
                Ok(_) => {}
                Err(CopyError::Read(source)) => {
                    return Err(PbError::ResourceUnavailable {
                        reference,
                        path,
                        source,
                    })
                }
                Err(CopyError::Write(e)) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
