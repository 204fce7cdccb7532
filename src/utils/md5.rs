//! Utility functions for `md5` hash computation.
//!
//! Files are streamed through the hash state one block at a time, so the
//! size of the file never dictates how much memory is used.
use derive_more::Display;
use md5::{Digest, Md5};
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Number of bytes requested from the file per read: 1 MiB.
pub const BLOCK_SIZE: usize = 1024 * 1024;

/// Failure to compute the digest of a file.
///
/// Every variant keeps the path that was being hashed, available through
/// [`Md5Error::path`] and left out of the message so callers can word it.
/// Variants that come from the operating system keep the original
/// [`io::Error`] as their source.
#[derive(Debug, Display)]
pub enum Md5Error {
    /// The path does not resolve to an existing file.
    #[display(fmt = "file does not exist")]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
    /// The path exists but cannot be read by the caller.
    #[display(fmt = "permission denied")]
    PermissionDenied {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
    /// The path is a directory, not a regular file.
    #[display(fmt = "is a directory")]
    IsADirectory {
        /// Path that was requested.
        path: PathBuf,
    },
    /// Any other failure while opening or reading the file.
    #[display(fmt = "read failed: {}", source)]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
}

impl Md5Error {
    /// Classify an I/O error raised while opening or reading `path`.
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            ErrorKind::NotFound => Self::NotFound { path, source },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            ErrorKind::IsADirectory => Self::IsADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// The [`ErrorKind`] that best describes this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::IsADirectory { .. } => ErrorKind::IsADirectory,
            Self::Io { ref source, .. } => source.kind(),
        }
    }

    /// Path of the file whose digest could not be computed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match *self {
            Self::NotFound { ref path, .. }
            | Self::PermissionDenied { ref path, .. }
            | Self::IsADirectory { ref path }
            | Self::Io { ref path, .. } => path,
        }
    }
}

impl std::error::Error for Md5Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Self::NotFound { ref source, .. }
            | Self::PermissionDenied { ref source, .. }
            | Self::Io { ref source, .. } => Some(source),
            Self::IsADirectory { .. } => None,
        }
    }
}

/// Compute the `md5` hash of a string.
///
/// The result is a hexadecimal string of 32 characters.
#[must_use]
pub fn compute<T: AsRef<[u8]>>(data: T) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hexify(hasher.finalize())
}

/// Render `bytes` as lowercase hex, two zero-padded digits per byte.
#[must_use]
pub fn hexify<T: AsRef<[u8]>>(bytes: T) -> String {
    hex::encode(bytes)
}

/// Compute the `md5` hash of the file at `path`, reading it in blocks of
/// [`BLOCK_SIZE`] bytes.
///
/// The result is a hexadecimal string of 32 characters.
///
/// # Errors
/// Will return `Err` if the file does not exist, cannot be read, is a
/// directory, or if a read fails part way through. No partial digest is
/// ever returned.
pub fn compute_md5<P: AsRef<Path>>(path: P) -> Result<String, Md5Error> {
    compute_md5_with_block_size(path, default_block_size())
}

/// Same as [`compute_md5`], with the number of bytes requested per read set
/// by the caller.
///
/// The digest does not depend on `block_size`, only memory use and the
/// number of read calls do.
///
/// # Errors
/// See [`compute_md5`].
pub fn compute_md5_with_block_size<P: AsRef<Path>>(
    path: P,
    block_size: NonZeroUsize,
) -> Result<String, Md5Error> {
    let path = path.as_ref();
    tracing::debug!(
        block_size = block_size.get(),
        "Computing md5 of {}",
        path.display()
    );
    let file = File::open(path).map_err(|err| Md5Error::from_io(path, err))?;
    let metadata = file.metadata().map_err(|err| Md5Error::from_io(path, err))?;
    if metadata.is_dir() {
        return Err(Md5Error::IsADirectory {
            path: path.to_path_buf(),
        });
    }
    // `file` is dropped on every return below, closing the handle.
    let digest =
        compute_reader(file, block_size).map_err(|err| Md5Error::from_io(path, err))?;
    tracing::debug!(digest = %digest, "Computed md5 of {}", path.display());
    Ok(digest)
}

/// Compute the `md5` hash of everything `reader` yields until end of stream.
///
/// Reads of up to `block_size` bytes are fed into the hash in order. A read
/// returning zero bytes marks the end of the stream. Interrupted reads are
/// re-issued; any other read error aborts the computation.
///
/// # Errors
/// Will return the first non-interrupted error raised by `reader`.
pub fn compute_reader<R: Read>(mut reader: R, block_size: NonZeroUsize) -> io::Result<String> {
    let mut hasher = Md5::new();
    let mut buffer = vec![0_u8; block_size.get()];
    let mut total: u64 = 0;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        let Some(block) = buffer.get(..read) else {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("reader reported {read} bytes for a {block_size} byte buffer"),
            ));
        };
        hasher.update(block);
        total += read as u64;
        tracing::trace!(read, total, "Hashed block");
    }
    Ok(hexify(hasher.finalize()))
}

/// [`BLOCK_SIZE`] as the non-zero type the block-wise readers take.
#[must_use]
pub const fn default_block_size() -> NonZeroUsize {
    match NonZeroUsize::new(BLOCK_SIZE) {
        Some(size) => size,
        None => NonZeroUsize::MIN,
    }
}
