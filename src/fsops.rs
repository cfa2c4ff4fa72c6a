//! Filesystem calls taking canonical UTF-8 paths.
//!
//! One wrapper per OS call the host routes through the boundary. Paths going
//! in are canonical text; names coming back out are converted to canonical
//! form before the host sees them.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::path::Path;

use crate::errors::{Error, Result};

/// Convert an OS string produced by the filesystem back to canonical UTF-8.
/// Names outside Unicode are decoded from the ambient locale where the OS
/// hands out raw bytes; an undecodable name is an error.
pub fn os_to_canonical(name: &OsStr) -> Result<String> {
    if let Some(s) = name.to_str() {
        return Ok(s.to_owned());
    }
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        let decoded = crate::locale::decode_native(name.as_bytes())?;
        String::from_utf8(decoded).map_err(|_| Error::Encoding {
            context: "locale decode produced invalid UTF-8",
        })
    }
    #[cfg(not(unix))]
    Err(Error::Encoding {
        context: "file name is not valid Unicode",
    })
}

/// File-type tag reported by [`listdir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

impl EntryKind {
    fn of(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// The S_IFMT-style mode bits for this kind.
    pub fn mode_bits(self) -> i64 {
        match self {
            EntryKind::Dir => 0o040000,
            EntryKind::File => 0o100000,
            EntryKind::Symlink => 0o120000,
            EntryKind::Other => 0,
        }
    }
}

/// One row of a [`listdir`] result.
#[derive(Debug)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
    pub stat: Option<fs::Metadata>,
}

/// Sorted listing of a directory.
///
/// Entries come back ordered by name, each with its kind and, when
/// `want_stat` is set, the lstat metadata. If an entry named `skip` turns
/// out to be a directory the whole listing is empty; callers use that to
/// prune nested repositories in a single pass.
pub fn listdir(path: &str, want_stat: bool, skip: Option<&str>) -> Result<Vec<DirEntry>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(path)? {
        names.push(os_to_canonical(&entry?.file_name())?);
    }
    names.sort();

    let mut result = Vec::with_capacity(names.len());
    for name in names {
        let stat = fs::symlink_metadata(Path::new(path).join(&name))?;
        let kind = EntryKind::of(stat.file_type());
        if skip == Some(name.as_str()) && kind == EntryKind::Dir {
            return Ok(Vec::new());
        }
        result.push(DirEntry {
            name,
            kind,
            stat: want_stat.then_some(stat),
        });
    }
    Ok(result)
}

/// stat() for a canonical path.
pub fn stat(path: &str) -> Result<fs::Metadata> {
    Ok(fs::metadata(path)?)
}

/// lstat() for a canonical path.
pub fn lstat(path: &str) -> Result<fs::Metadata> {
    Ok(fs::symlink_metadata(path)?)
}

pub fn exists(path: &str) -> bool {
    Path::new(path).exists()
}

pub fn is_dir(path: &str) -> bool {
    Path::new(path).is_dir()
}

pub fn is_symlink(path: &str) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

pub fn unlink(path: &str) -> Result<()> {
    Ok(fs::remove_file(path)?)
}

pub fn rename(from: &str, to: &str) -> Result<()> {
    Ok(fs::rename(from, to)?)
}

pub fn mkdir(path: &str) -> Result<()> {
    Ok(fs::create_dir(path)?)
}

/// mkdir -p.
pub fn makedirs(path: &str) -> Result<()> {
    Ok(fs::create_dir_all(path)?)
}

/// Remove `path`, then every parent that is left empty.
pub fn removedirs(path: &str) -> Result<()> {
    fs::remove_dir(path)?;
    let mut current = Path::new(path);
    while let Some(parent) = current.parent() {
        if parent.as_os_str().is_empty() || fs::remove_dir(parent).is_err() {
            break;
        }
        current = parent;
    }
    Ok(())
}

#[cfg(unix)]
pub fn chmod(path: &str, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    Ok(fs::set_permissions(path, fs::Permissions::from_mode(mode))?)
}

/// On the console-API platform only the write bit is honored.
#[cfg(windows)]
pub fn chmod(path: &str, mode: u32) -> Result<()> {
    let mut perm = fs::metadata(path)?.permissions();
    perm.set_readonly(mode & 0o200 == 0);
    Ok(fs::set_permissions(path, perm)?)
}

pub fn copy_file(from: &str, to: &str) -> Result<()> {
    fs::copy(from, to)?;
    Ok(())
}

/// Copy permission bits only, the second half of a copy.
pub fn copy_mode(from: &str, to: &str) -> Result<()> {
    let perm = fs::metadata(from)?.permissions();
    Ok(fs::set_permissions(to, perm)?)
}

/// Open for reading.
pub fn open(path: &str) -> Result<File> {
    Ok(File::open(path)?)
}

/// The working directory as a canonical path.
pub fn getcwd() -> Result<String> {
    os_to_canonical(std::env::current_dir()?.as_os_str())
}
