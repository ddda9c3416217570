use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::tables::nodes::NodeRow;
use crate::tables::sessions::SessionRow;
use crate::tables::timeline::TimelineRow;
use crate::writer::{CsvTable, OutputError};

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputType {
    Nodes,
    Sessions,
    Timeline,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputSettings {
    pub output_path: String,
    pub outputs: Vec<Outputs>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_path: "resultados".to_string(),
            outputs: vec![
                Outputs::new(OutputType::Nodes, "agrup_v2x.csv"),
                Outputs::new(OutputType::Sessions, "agrup_sessions.csv"),
                Outputs::new(OutputType::Timeline, "agrup_timeline.csv"),
            ],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Outputs {
    pub output_type: OutputType,
    pub output_filename: String,
}

impl Outputs {
    pub fn new(output_type: OutputType, output_filename: &str) -> Self {
        Self {
            output_type,
            output_filename: output_filename.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Results {
    pub nodes: Option<CsvTable<NodeRow>>,
    pub sessions: Option<CsvTable<SessionRow>>,
    pub timeline: Option<CsvTable<TimelineRow>>,
}

impl Results {
    /// Creates the writers of every requested table under `base_path/output_path`.
    pub fn new(base_path: &Path, output_settings: &OutputSettings) -> Result<Self, OutputError> {
        let output_path = base_path.join(&output_settings.output_path);
        if !output_path.exists() {
            fs::create_dir_all(&output_path).map_err(|source| OutputError::Io {
                path: output_path.clone(),
                source,
            })?;
        }

        Ok(Self {
            nodes: Self::table_for(&output_path, output_settings, OutputType::Nodes)?,
            sessions: Self::table_for(&output_path, output_settings, OutputType::Sessions)?,
            timeline: Self::table_for(&output_path, output_settings, OutputType::Timeline)?,
        })
    }

    /// Results that discard every row.
    pub fn disabled() -> Self {
        Self::default()
    }

    fn table_for<R: serde::Serialize>(
        output_path: &Path,
        output_settings: &OutputSettings,
        output_type: OutputType,
    ) -> Result<Option<CsvTable<R>>, OutputError> {
        output_settings
            .outputs
            .iter()
            .filter(|output| output.output_type == output_type)
            .last()
            .map(|settings| {
                let file: PathBuf = output_path.join(&settings.output_filename);
                CsvTable::new(&file)
            })
            .transpose()
    }

    pub fn add_node(&mut self, row: NodeRow) {
        if let Some(table) = &mut self.nodes {
            table.add_row(row);
        }
    }

    pub fn add_session(&mut self, row: SessionRow) {
        if let Some(table) = &mut self.sessions {
            table.add_row(row);
        }
    }

    pub fn add_transition(&mut self, row: TimelineRow) {
        if let Some(table) = &mut self.timeline {
            table.add_row(row);
        }
    }

    pub fn write_to_file(&mut self) -> Result<(), OutputError> {
        if let Some(writer) = &mut self.nodes {
            writer.write_to_file()?;
        }
        if let Some(writer) = &mut self.sessions {
            writer.write_to_file()?;
        }
        if let Some(writer) = &mut self.timeline {
            writer.write_to_file()?;
        }
        Ok(())
    }

    pub fn close_files(self) -> Result<(), OutputError> {
        if let Some(writer) = self.nodes {
            writer.close()?;
        }
        if let Some(writer) = self.sessions {
            writer.close()?;
        }
        if let Some(writer) = self.timeline {
            writer.close()?;
        }
        Ok(())
    }
}
