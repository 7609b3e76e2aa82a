use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ident;
use crate::mime::has_image_extension;

const PERSIST_ATTEMPTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreRoot {
    Uploads,
    Memes,
}

impl StoreRoot {
    pub fn dir_name(self) -> &'static str {
        match self {
            StoreRoot::Uploads => "uploads",
            StoreRoot::Memes => "memes",
        }
    }

    fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "uploads" => Some(StoreRoot::Uploads),
            "memes" => Some(StoreRoot::Memes),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("asset not found: {reference}")]
    NotFound { reference: String },
    #[error("invalid asset reference: {reference}")]
    InvalidReference { reference: String },
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct AssetStore {
    public_dir: PathBuf,
}

impl AssetStore {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    pub fn root_dir(&self, root: StoreRoot) -> PathBuf {
        self.public_dir.join(root.dir_name())
    }

    pub fn ensure_root(&self, root: StoreRoot) -> Result<(), StoreError> {
        fs::create_dir_all(self.root_dir(root))?;
        Ok(())
    }

    pub fn resolve(&self, reference: &str) -> Result<Vec<u8>, StoreError> {
        let (root, file_name) = split_reference(reference)?;
        let path = self.root_dir(root).join(file_name);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                reference: reference.to_string(),
            }),
            Err(err) => Err(StoreError::Storage(err)),
        }
    }

    pub fn persist(
        &self,
        root: StoreRoot,
        file_name_prefix: &str,
        bytes: &[u8],
        extension: &str,
    ) -> Result<String, StoreError> {
        self.ensure_root(root)?;
        let root_dir = self.root_dir(root);
        let mut temp = tempfile::NamedTempFile::new_in(&root_dir)?;
        temp.write_all(bytes)?;
        for _ in 0..PERSIST_ATTEMPTS {
            let file_name = format!("{}{}.{}", file_name_prefix, ident::generate(), extension);
            match temp.persist_noclobber(root_dir.join(&file_name)) {
                Ok(_) => return Ok(format!("/{}/{}", root.dir_name(), file_name)),
                Err(err) if err.error.kind() == std::io::ErrorKind::AlreadyExists => {
                    temp = err.file;
                }
                Err(err) => return Err(StoreError::Storage(err.error)),
            }
        }
        Err(StoreError::Storage(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "could not find a free asset name",
        )))
    }

    pub fn list(&self, root: StoreRoot) -> Result<Vec<String>, StoreError> {
        let root_dir = self.root_dir(root);
        if !root_dir.exists() {
            return Ok(Vec::new());
        }
        let mut references = Vec::new();
        for entry in fs::read_dir(&root_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if has_image_extension(name) {
                references.push(format!("/{}/{}", root.dir_name(), name));
            }
        }
        references.sort();
        Ok(references)
    }
}

fn split_reference(reference: &str) -> Result<(StoreRoot, &str), StoreError> {
    let invalid = || StoreError::InvalidReference {
        reference: reference.to_string(),
    };
    let trimmed = reference.trim_start_matches('/');
    let mut parts = trimmed.split('/');
    let root = parts
        .next()
        .and_then(StoreRoot::from_dir_name)
        .ok_or_else(invalid)?;
    let file_name = parts
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(invalid)?;
    if parts.next().is_some() || file_name == "." || file_name == ".." || file_name.contains('\\') {
        return Err(invalid());
    }
    Ok((root, file_name))
}
