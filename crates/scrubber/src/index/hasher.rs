use crate::error::{Result, ScrubError};
use md5::{Digest, Md5};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

const BUFFER_SIZE: usize = 8192;

/// Content digest used for duplicate detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
    #[default]
    Blake3,
    Md5,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Md5 => "md5",
        }
    }

    /// Length of the hex digest this algorithm produces.
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Blake3 => 64,
            HashAlgorithm::Md5 => 32,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ScrubError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "blake3" => Ok(HashAlgorithm::Blake3),
            "md5" => Ok(HashAlgorithm::Md5),
            _ => Err(ScrubError::Config(format!(
                "Invalid hash algorithm '{}'. Use 'blake3' or 'md5'",
                value
            ))),
        }
    }
}

/// Hashes a file with the given algorithm.
pub fn hash_file<P: AsRef<Path>>(path: P, algorithm: HashAlgorithm) -> Result<String> {
    match algorithm {
        HashAlgorithm::Blake3 => hash_file_blake3(path),
        HashAlgorithm::Md5 => hash_file_md5(path),
    }
}

/// Computes blake3 hash of a file
///
/// Uses streaming implementation for memory efficiency with large files.
/// Reads the file in 8KB chunks to minimize memory usage.
pub fn hash_file_blake3<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let mut hasher = blake3::Hasher::new();
    stream_file(path, |chunk| {
        hasher.update(chunk);
    })?;
    Ok(hasher.finalize().to_hex().to_string())
}

/// Computes MD5 hash of a file
pub fn hash_file_md5<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let mut hasher = Md5::new();
    stream_file(path, |chunk| hasher.update(chunk))?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn stream_file<F: FnMut(&[u8])>(path: &Path, mut consume: F) -> Result<()> {
    let to_hash_error = |e: std::io::Error| ScrubError::Hash {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let file = File::open(path).map_err(to_hash_error)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut buffer = [0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(to_hash_error)?;
        if bytes_read == 0 {
            break;
        }
        consume(&buffer[..bytes_read]);
    }

    Ok(())
}
