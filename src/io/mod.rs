//! Job file I/O.
//!
//! The command-line tool reads polygons from a JSON job file and writes the
//! packed UVs to a JSON result file. See [`job`] for the record layout.
//!
//! # Usage
//!
//! ```no_run
//! use tessera::algo::pack::pack;
//! use tessera::io::{load_job, save_uvs, UvFile};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let job = load_job("windows.json").unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(9);
//! let uvs = pack(&job.to_polygons(), &job.options, &mut rng).unwrap();
//! save_uvs(&UvFile::new(Some(9), &uvs), "windows.uv.json").unwrap();
//! ```

pub mod job;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PackError, Result};

pub use job::{CornerRecord, PackJob, PolygonRecord, UvFile, UvRecord};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| PackError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| PackError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Load a pack job.
pub fn load_job<P: AsRef<Path>>(path: P) -> Result<PackJob> {
    read_json(path.as_ref())
}

/// Save a pack job.
pub fn save_job<P: AsRef<Path>>(job: &PackJob, path: P) -> Result<()> {
    write_json(job, path.as_ref())
}

/// Load a UV result file.
pub fn load_uvs<P: AsRef<Path>>(path: P) -> Result<UvFile> {
    read_json(path.as_ref())
}

/// Save a UV result file.
pub fn save_uvs<P: AsRef<Path>>(uvs: &UvFile, path: P) -> Result<()> {
    write_json(uvs, path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::pack::{pack, Corner, PackOptions, Polygon};
    use nalgebra::{Point3, Vector3};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn window(first_loop: u32) -> Polygon {
        Polygon::new(
            Vector3::new(0.0, -1.0, 0.0),
            (0..4)
                .map(|i| {
                    let x = if i == 1 || i == 2 { 1.0 } else { 0.0 };
                    let z = if i >= 2 { 2.0 } else { 0.0 };
                    Corner::new(first_loop + i, Point3::new(x, 0.0, z))
                })
                .collect(),
        )
    }

    #[test]
    fn test_job_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");

        let job = PackJob::new(PackOptions::default().with_grid(2, 3), &[window(0), window(4)]);
        save_job(&job, &path).unwrap();

        let loaded = load_job(&path).unwrap();
        assert_eq!(loaded, job);
        assert_eq!(loaded.options.cols, 3);
    }

    #[test]
    fn test_uv_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let uvs = pack(&[window(0), window(4)], &PackOptions::default(), &mut rng).unwrap();
        save_uvs(&UvFile::new(Some(4), &uvs), &path).unwrap();

        let loaded = load_uvs(&path).unwrap();
        assert_eq!(loaded.seed, Some(4));
        assert_eq!(loaded.to_map(), uvs);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_job(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, PackError::Io(_)));
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ \"polygons\": 3 }").unwrap();

        let err = load_job(&path).unwrap_err();
        assert!(matches!(err, PackError::LoadError { .. }));
    }
}
