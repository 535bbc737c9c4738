use std::path::PathBuf;

pub enum ModelSource {
    File(PathBuf),
    Memory(Vec<u8>),
}

impl ModelSource {
    /// Read a file source into memory; memory sources pass through.
    pub fn into_bytes(self) -> std::io::Result<Vec<u8>> {
        match self {
            ModelSource::File(path) => std::fs::read(path),
            ModelSource::Memory(bytes) => Ok(bytes),
        }
    }
}
