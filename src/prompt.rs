//! Interactive selection of the source and destination roots

use crate::styling;
use dialoguer::Input;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("directory/file {} does not exist", .0.display())]
    MissingSource(PathBuf),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("{source} {}", .path.display())]
    CreateDest {
        #[source]
        source: io::Error,
        path: PathBuf,
    },
    #[error(transparent)]
    Interaction(#[from] dialoguer::Error),
}

/// State of the destination root after [`prepare_dest_root`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestRoot {
    /// Already existed; mirroring proceeds into it
    Existing,
    Created,
}

pub fn validate_source_root(path: &Path) -> Result<(), PromptError> {
    if !path.exists() {
        return Err(PromptError::MissingSource(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(PromptError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Make sure the destination root exists, creating it and its parents if needed
pub fn prepare_dest_root(path: &Path) -> Result<DestRoot, PromptError> {
    if path.exists() {
        return Ok(DestRoot::Existing);
    }
    fs::create_dir_all(path).map_err(|source| PromptError::CreateDest {
        source,
        path: path.to_path_buf(),
    })?;
    Ok(DestRoot::Created)
}

/// Ask for the source root until an existing directory is entered
pub fn ask_source_root() -> Result<PathBuf, PromptError> {
    loop {
        let answer: String = Input::new()
            .with_prompt("enter an input directory")
            .interact_text()?;
        let path = PathBuf::from(answer);
        match validate_source_root(&path) {
            Ok(()) => return Ok(path),
            Err(err) => styling::print_error(&err.to_string()),
        }
    }
}

/// Ask for the destination root until it exists or could be created
pub fn ask_dest_root() -> Result<PathBuf, PromptError> {
    loop {
        let answer: String = Input::new()
            .with_prompt("enter an output directory")
            .interact_text()?;
        let path = PathBuf::from(answer);
        match prepare_dest_root(&path) {
            Ok(DestRoot::Existing) => {
                styling::print_warning(&format!("directory {} already exists", path.display()));
                return Ok(path);
            }
            Ok(DestRoot::Created) => return Ok(path),
            Err(err) => styling::print_error(&err.to_string()),
        }
    }
}
