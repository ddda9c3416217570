use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize a row of {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Buffers rows of one result table and writes them to a CSV file with a header row.
#[derive(Debug)]
pub struct CsvTable<R: Serialize> {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: Vec<R>,
}

impl<R: Serialize> CsvTable<R> {
    pub fn new(path: &Path) -> Result<Self, OutputError> {
        let file = File::create(path).map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: csv::Writer::from_writer(file),
            rows: Vec::new(),
        })
    }

    pub fn add_row(&mut self, row: R) {
        self.rows.push(row);
    }

    pub fn pending(&self) -> usize {
        self.rows.len()
    }

    pub fn write_to_file(&mut self) -> Result<(), OutputError> {
        debug!("Writing {} rows to {}", self.rows.len(), self.path.display());
        for row in self.rows.drain(..) {
            self.writer
                .serialize(row)
                .map_err(|source| OutputError::Csv {
                    path: self.path.clone(),
                    source,
                })?;
        }
        self.writer.flush().map_err(|source| OutputError::Io {
            path: self.path.clone(),
            source,
        })
    }

    pub fn close(mut self) -> Result<(), OutputError> {
        self.write_to_file()
    }
}
