//! Loading of tuning files and arena maps.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use grid_siege_core::Tuning;
use grid_siege_world::{Arena, ArenaParseError};
use log::info;
use thiserror::Error;

/// Errors raised while reading run configuration from disk.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The tuning file is not valid TOML for [`Tuning`].
    #[error("invalid tuning file {}", path.display())]
    Tuning {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
    /// The arena file is not a valid ASCII map.
    #[error("invalid arena file {}", path.display())]
    Arena {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: ArenaParseError,
    },
}

/// Loads tuning from a TOML file, falling back to defaults without one.
pub(crate) fn load_tuning(path: Option<&Path>) -> Result<Tuning, ConfigError> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let text = read(path)?;
    let tuning = toml::from_str(&text).map_err(|source| ConfigError::Tuning {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded tuning from {}", path.display());
    Ok(tuning)
}

/// Loads an arena file, falling back to the built-in arena without one.
pub(crate) fn load_arena(path: Option<&Path>) -> Result<Arena, ConfigError> {
    let Some(path) = path else {
        return Ok(Arena::default());
    };
    let text = read(path)?;
    let arena = Arena::parse(&text).map_err(|source| ConfigError::Arena {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded arena from {}", path.display());
    Ok(arena)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_siege_core::{HitPolicy, TileMap};

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("grid-siege-{}-{name}", std::process::id()));
        fs::write(&path, contents).expect("write scratch file");
        path
    }

    #[test]
    fn missing_paths_use_defaults() {
        assert_eq!(load_tuning(None).expect("defaults"), Tuning::default());
        assert_eq!(load_arena(None).expect("defaults"), Arena::default());
    }

    #[test]
    fn tuning_file_overrides_fields() {
        let path = scratch_file(
            "tuning.toml",
            "spawn_interval_ticks = 90\nhit_policy = \"all_overlapping\"\n",
        );
        let tuning = load_tuning(Some(&path)).expect("tuning loads");
        let _ = fs::remove_file(&path);

        assert_eq!(tuning.spawn_interval_ticks, 90);
        assert_eq!(tuning.hit_policy, HitPolicy::AllOverlapping);
        assert_eq!(tuning.entry_delay_ticks, 30);
    }

    #[test]
    fn malformed_tuning_names_the_file() {
        let path = scratch_file("broken.toml", "spawn_interval_ticks = \"soon\"\n");
        let error = load_tuning(Some(&path)).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(error, ConfigError::Tuning { .. }));
        assert!(error.to_string().contains("broken.toml"));
    }

    #[test]
    fn arena_file_is_parsed() {
        let path = scratch_file("arena.txt", "#####\n#...#\n#####\n");
        let arena = load_arena(Some(&path)).expect("arena loads");
        let _ = fs::remove_file(&path);
        assert_eq!((arena.width(), arena.height()), (5, 3));
    }

    #[test]
    fn unreadable_arena_reports_read_error() {
        let path = std::env::temp_dir().join("grid-siege-missing-arena.txt");
        assert!(matches!(
            load_arena(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }
}
