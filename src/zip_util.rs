use std::io::prelude::*;
use std::io::Cursor;
use zip::result::ZipResult;
use zip::ZipArchive;

pub type PseudoFile = Cursor<Vec<u8>>;

/// Reads a whole archive member into memory so it can be handed to an XML reader.
pub fn entry_to_pseudofile<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> ZipResult<PseudoFile> {
    let mut entry = archive.by_name(name)?;
    let mut tmp = Cursor::new(Vec::with_capacity(entry.size() as usize));
    entry.read_to_end(tmp.get_mut())?;
    Ok(tmp)
}
