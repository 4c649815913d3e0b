use std::io;
use std::path::PathBuf;

use chrono::Datelike;
use serde_json::Value;

use crate::fs_json_util::write_json_pretty;
use crate::schema::{ArchiveFileName, FetchWindow, GameMode};

/// Date-organized tree of saved game lists: `<root>/<year>/<month>/<day>/`.
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn day_dir(&self, window: FetchWindow) -> PathBuf {
        let start = window.start();
        self.root
            .join(start.year().to_string())
            .join(format!("{:02}", start.month()))
            .join(format!("{:02}", start.day()))
    }

    /// Looks for a file already recording this window and mode.
    /// The match count in the name is ignored, as it is only known after a fetch.
    pub fn existing_file(
        &self,
        window: FetchWindow,
        mode: GameMode,
    ) -> anyhow::Result<Option<PathBuf>> {
        let entries = match fs_err::read_dir(self.day_dir(window)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            match name.parse::<ArchiveFileName>() {
                Ok(parsed) if parsed.matches(window, mode) => return Ok(Some(entry.path())),
                _ => {}
            }
        }
        Ok(None)
    }

    pub fn save(
        &self,
        window: FetchWindow,
        mode: GameMode,
        games: &[Value],
    ) -> anyhow::Result<PathBuf> {
        let dir = self.day_dir(window);
        fs_err::create_dir_all(&dir)?;
        let path = dir.join(ArchiveFileName::new(window, mode, games.len()).to_string());
        write_json_pretty(&path, &games)?;
        Ok(path)
    }
}
