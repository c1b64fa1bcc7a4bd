//! # Note Store
//!
//! Reads and writes notes in the vault: one flat directory, one `.md` file per
//! note, the filename being the only identifier.
//!
//! ```text
//! ~/.termnote/
//! ├── groceries.md
//! ├── standup.md
//! └── todo.md
//! ```
//!
//! The `Vault` is built once at startup from the resolved config and handed to
//! the `App`. An open note is represented by a `NoteHandle` that owns the file
//! for as long as the note stays in the editor.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::relative_time::format_relative;

/// Extension appended to every new note.
pub const NOTE_EXTENSION: &str = ".md";

/// Characters that may not appear in a note name.
pub const RESERVED_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum NoteError {
    /// Empty name or a name containing a reserved character. Shown inline.
    InvalidName(String),
    /// A note with this filename already exists.
    AlreadyExists(String),
    ReadFailed { filename: String, source: io::Error },
    WriteFailed { filename: String, source: io::Error },
    DeleteFailed { filename: String, source: io::Error },
    /// The vault directory cannot be created or listed. Fatal.
    VaultUnavailable { path: PathBuf, source: io::Error },
}

impl NoteError {
    /// True for errors the session cannot recover from.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NoteError::VaultUnavailable { .. })
    }
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::InvalidName(name) if name.trim().is_empty() => {
                write!(f, "note name cannot be empty")
            }
            NoteError::InvalidName(name) => write!(
                f,
                "invalid note name '{name}': names cannot contain / \\ : * ? \" < > |"
            ),
            NoteError::AlreadyExists(filename) => write!(f, "{filename} already exists"),
            NoteError::ReadFailed { filename, source } => {
                write!(f, "cannot read {filename}: {source}")
            }
            NoteError::WriteFailed { filename, source } => {
                write!(f, "cannot save {filename}: {source}")
            }
            NoteError::DeleteFailed { filename, source } => {
                write!(f, "cannot delete {filename}: {source}")
            }
            NoteError::VaultUnavailable { path, source } => {
                write!(f, "vault {} is unavailable: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for NoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NoteError::ReadFailed { source, .. }
            | NoteError::WriteFailed { source, .. }
            | NoteError::DeleteFailed { source, .. }
            | NoteError::VaultUnavailable { source, .. } => Some(source),
            NoteError::InvalidName(_) | NoteError::AlreadyExists(_) => None,
        }
    }
}

// ============================================================================
// List Items
// ============================================================================

/// Display projection of a note for the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// What the list shows. May be decorated or truncated by the renderer.
    pub title: String,
    /// `"Modified: 5 minutes ago"`
    pub description: String,
    /// The raw filename, used to open or delete the note.
    pub filename: String,
    pub modified: DateTime<Local>,
}

impl ListItem {
    pub fn new(filename: String, modified: DateTime<Local>, now: DateTime<Local>) -> Self {
        Self {
            title: filename.clone(),
            description: format!("Modified: {}", format_relative(modified, now)),
            filename,
            modified,
        }
    }
}

// ============================================================================
// Name Validation
// ============================================================================

/// Validate a user-typed note name and turn it into a filename.
///
/// Surrounding whitespace is trimmed and `.md` is appended unless already present.
pub fn note_filename(name: &str) -> Result<String, NoteError> {
    let name = name.trim();
    if name.is_empty() || name.contains(RESERVED_CHARS) {
        return Err(NoteError::InvalidName(name.to_string()));
    }
    if name.ends_with(NOTE_EXTENSION) {
        if name.len() == NOTE_EXTENSION.len() {
            return Err(NoteError::InvalidName(name.to_string()));
        }
        Ok(name.to_string())
    } else {
        Ok(format!("{name}{NOTE_EXTENSION}"))
    }
}

/// Filenames coming back from the list must still be plain names inside the vault.
fn check_filename(filename: &str) -> Result<(), NoteError> {
    if filename.is_empty() || filename.contains(RESERVED_CHARS) || filename == ".." {
        return Err(NoteError::InvalidName(filename.to_string()));
    }
    Ok(())
}

// ============================================================================
// Vault
// ============================================================================

#[derive(Debug, Clone)]
pub struct Vault {
    dir: PathBuf,
}

impl Vault {
    /// Open the vault at `dir`, creating it if absent.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, NoteError> {
        let dir = dir.into();
        let unavailable = |source| NoteError::VaultUnavailable {
            path: dir.clone(),
            source,
        };

        fs::create_dir_all(&dir).map_err(unavailable)?;
        // Fail at startup rather than on the first list refresh
        fs::read_dir(&dir).map_err(unavailable)?;

        info!("Vault opened at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// List every note, most recently modified first.
    pub fn list_notes(&self) -> Result<Vec<ListItem>, NoteError> {
        self.list_notes_at(Local::now())
    }

    /// Same as [`Vault::list_notes`] with an explicit reference time for the
    /// relative descriptions.
    pub fn list_notes_at(&self, now: DateTime<Local>) -> Result<Vec<ListItem>, NoteError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| NoteError::VaultUnavailable {
            path: self.dir.clone(),
            source,
        })?;

        let mut notes: Vec<(String, DateTime<Local>)> = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable vault entry: {}", e);
                    continue;
                }
            };
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    warn!("Skipping {:?}: {}", entry.file_name(), e);
                    continue;
                }
            };
            if metadata.is_dir() {
                continue;
            }
            let modified = match metadata.modified() {
                Ok(t) => DateTime::<Local>::from(t),
                Err(e) => {
                    warn!("No modification time for {:?}: {}", entry.file_name(), e);
                    continue;
                }
            };
            notes.push((entry.file_name().to_string_lossy().into_owned(), modified));
        }

        notes.sort_by(|a, b| b.1.cmp(&a.1));
        debug!("Listed {} notes in {}", notes.len(), self.dir.display());

        Ok(notes
            .into_iter()
            .map(|(filename, modified)| ListItem::new(filename, modified, now))
            .collect())
    }

    /// Create an empty note named `name` (`.md` appended if missing).
    pub fn create_note(&self, name: &str) -> Result<NoteHandle, NoteError> {
        let filename = note_filename(name)?;
        let path = self.path_of(&filename);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                io::ErrorKind::AlreadyExists => NoteError::AlreadyExists(filename.clone()),
                _ => NoteError::WriteFailed {
                    filename: filename.clone(),
                    source,
                },
            })?;

        info!("Created note {}", path.display());
        Ok(NoteHandle { file, filename })
    }

    /// Read a note and keep it open for saving.
    pub fn open_note(&self, filename: &str) -> Result<(String, NoteHandle), NoteError> {
        check_filename(filename)?;
        let path = self.path_of(filename);
        let read_failed = |source| NoteError::ReadFailed {
            filename: filename.to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(read_failed)?;

        let mut content = String::new();
        file.read_to_string(&mut content).map_err(read_failed)?;

        info!("Opened note {} ({} bytes)", path.display(), content.len());
        Ok((
            content,
            NoteHandle {
                file,
                filename: filename.to_string(),
            },
        ))
    }

    pub fn delete_note(&self, filename: &str) -> Result<(), NoteError> {
        check_filename(filename)?;
        let path = self.path_of(filename);
        fs::remove_file(&path).map_err(|source| NoteError::DeleteFailed {
            filename: filename.to_string(),
            source,
        })?;
        info!("Deleted note {}", path.display());
        Ok(())
    }
}

// ============================================================================
// Note Handle
// ============================================================================

/// An open note. Owns the file exclusively until closed.
#[derive(Debug)]
pub struct NoteHandle {
    file: File,
    filename: String,
}

impl NoteHandle {
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Replace the file's content with `content` and flush it to disk.
    ///
    /// The handle stays open so editing can continue.
    pub fn save(&mut self, content: &str) -> Result<(), NoteError> {
        self.write_all(content).map_err(|source| NoteError::WriteFailed {
            filename: self.filename.clone(),
            source,
        })?;
        info!("Saved {} ({} bytes)", self.filename, content.len());
        Ok(())
    }

    fn write_all(&mut self, content: &str) -> io::Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(content.as_bytes())?;
        self.file.sync_all()
    }

    /// Handle over a read-only descriptor, so every save fails.
    #[cfg(test)]
    pub(crate) fn read_only(dir: &Path, filename: &str) -> io::Result<Self> {
        Ok(Self {
            file: File::open(dir.join(filename))?,
            filename: filename.to_string(),
        })
    }

    /// Release the file. Anything not saved is dropped.
    pub fn close(self) {
        debug!("Closed {}", self.filename);
    }
}
