use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;

pub fn read(path: &Path, kind: &str) -> Result<String> {
    match fs::read_to_string(path) {
        Err(e) => Err(anyhow!("Reading {} file `{}`: {}", kind, path.display(), e)),
        Ok(contents) => Ok(contents),
    }
}
