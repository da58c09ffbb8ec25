use std::fs;
use std::path::Path;

use tracing::info;

use super::error::ChartError;
use super::osu;
use crate::model::Beatmap;

pub struct ChartLoader;

impl ChartLoader {
    /// Load and parse a chart file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Beatmap, ChartError> {
        Self::load_with_id(path).map(|(map, _)| map)
    }

    /// Load a chart file and also return its stable chart id.
    pub fn load_with_id<P: AsRef<Path>>(path: P) -> Result<(Beatmap, String), ChartError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ChartError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let source = String::from_utf8(bytes).map_err(|_| ChartError::Decode {
            path: path.to_path_buf(),
        })?;
        let map = osu::parse(&source);
        info!(
            title = %map.title,
            artist = %map.artist,
            notes = map.note_count(),
            "loaded chart"
        );
        Ok((map, osu::chart_id(&source)))
    }
}
