//! JSON Lines writer for records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::types::Record;

/// Writes records as one JSON object per line.
pub struct JsonlWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl JsonlWriter {
    /// Create `<folder>/<name>.jsonl`, creating the folder if needed.
    pub fn create(folder: impl AsRef<Path>, name: &str) -> Result<Self> {
        let folder = folder.as_ref();
        fs::create_dir_all(folder)?;
        let path = folder.join(format!("{}.jsonl", name));
        let writer = BufWriter::new(File::create(&path)?);

        debug!(path = %path.display(), "Opened JSONL output");

        Ok(Self {
            path,
            writer,
            written: 0,
        })
    }

    /// Append one record.
    pub fn write(&mut self, record: &Record) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Flush and return the number of records written.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentOutcome;
    use serde_json::Map;

    #[test]
    fn test_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = JsonlWriter::create(dir.path().join("out"), "00000").unwrap();
        let path = writer.path().to_path_buf();

        for (file, text) in [("a/x.py", "x = 1"), ("b/y.py", "y = 2\nz = 3")] {
            let record = Record::new(file, ContentOutcome::Text(text.to_string()), &Map::new());
            writer.write(&record).unwrap();
        }
        assert_eq!(writer.finish().unwrap(), 2);

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: Record = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.text, "y = 2\nz = 3");
        assert_eq!(second.metadata.repo_id, "b");
    }
}
