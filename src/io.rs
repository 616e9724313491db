//! Whole-file read and write helpers used around the in-memory core.
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use crate::{
    error::{WavEditError, WavEditResult},
    log,
};

fn open(path: &Path) -> WavEditResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WavEditError::FileNotFound(path.to_path_buf()),
        _ => WavEditError::from(e),
    })
}

/// Reads the entire file at `path` into memory.
pub fn read_whole_file<P: AsRef<Path>>(path: P) -> WavEditResult<Vec<u8>> {
    let path = path.as_ref();
    let mut file = open(path)?;
    let mut bytes = Vec::with_capacity(file.metadata().map(|m| m.len() as usize).unwrap_or(0));
    file.read_to_end(&mut bytes)?;
    log!(
        log::Level::Debug,
        "Read {} bytes from {}",
        bytes.len(),
        path.display()
    );
    Ok(bytes)
}

/// Reads at most `max_bytes` from the start of the file. Shorter files are returned whole.
pub fn read_file_prefix<P: AsRef<Path>>(path: P, max_bytes: usize) -> WavEditResult<Vec<u8>> {
    let path = path.as_ref();
    let file = open(path)?;
    let mut bytes = Vec::with_capacity(max_bytes.min(64 * 1024));
    file.take(max_bytes as u64).read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Creates or truncates the file at `path` and writes `bytes` to it.
pub fn write_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> WavEditResult<()> {
    let path = path.as_ref();
    let f = File::create(path)?;
    let mut buf_writer = BufWriter::new(f);
    buf_writer.write_all(bytes)?;
    buf_writer.flush()?;
    log!(
        log::Level::Debug,
        "Wrote {} bytes to {}",
        bytes.len(),
        path.display()
    );
    Ok(())
}

pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}
