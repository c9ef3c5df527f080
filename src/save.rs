use crate::character::Character;
use crate::error::SaveError;

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{File, create_dir_all, read_dir, write};
use std::path::{Path, PathBuf};

pub const SAVE_EXTENSION: &str = "json";
pub const SAME_SAVES_LIMIT: u32 = 256;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type Result<T> = std::result::Result<T, SaveError>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SaveInfo {
    pub savetime: String,
    pub savename: String,
}

// On-disk layout: save metadata first, then the character.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SaveGame {
    pub save: SaveInfo,
    pub character: Character,
}

impl SaveGame {
    pub fn new(savename: String, character: Character) -> Self {
        Self {
            save: SaveInfo {
                savetime: current_timestamp(),
                savename,
            },
            character,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveSlot {
    Free(String),
    // Every name up to the limit is taken; this is the last one.
    LimitReached(String),
}

#[derive(Clone, Debug)]
pub struct SaveManager {
    save_dir: PathBuf,
    pub available_saves: Vec<String>,
}

impl SaveManager {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        let mut manager = Self {
            save_dir: save_dir.into(),
            available_saves: Vec::new(),
        };
        match manager.scan_save_files() {
            Ok(saves) => manager.available_saves = saves,
            Err(e) => log::warn!("Could not scan saves: {e}"),
        }
        manager
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn save_path(&self, save_name: &str) -> PathBuf {
        self.save_dir.join(format!("{save_name}.{SAVE_EXTENSION}"))
    }

    // Creates the folder if needed and lists save names, sorted.
    pub fn scan_save_files(&self) -> Result<Vec<String>> {
        self.ensure_save_dir()?;

        let mut saves: Vec<String> = read_dir(&self.save_dir)?
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                if path.is_file() && path.extension()? == SAVE_EXTENSION {
                    path.file_stem()?.to_str().map(String::from)
                } else {
                    None
                }
            })
            .collect();
        saves.sort();
        Ok(saves)
    }

    pub fn refresh(&mut self) -> Result<&[String]> {
        self.available_saves = self.scan_save_files()?;
        Ok(&self.available_saves)
    }

    /// Picks `<name>_<n>` with the smallest free `n`, starting from 1.
    pub fn next_save_name(&self, name: &str) -> SaveSlot {
        log::info!("No save name for {name} yet, format is Name_1, Name_2, ...");
        for index in 1..=SAME_SAVES_LIMIT {
            let candidate = format!("{name}_{index}");
            if !self.save_path(&candidate).exists() {
                log::info!("Created save name {candidate}");
                return SaveSlot::Free(candidate);
            }
        }
        SaveSlot::LimitReached(format!("{name}_{SAME_SAVES_LIMIT}"))
    }

    pub fn save(&mut self, game: &SaveGame) -> Result<PathBuf> {
        if game.character.name().is_empty() || game.save.savename.is_empty() {
            return Err(SaveError::MissingName);
        }
        self.ensure_save_dir()?;

        let save_path = self.save_path(&game.save.savename);
        let serialized = serde_json::to_string_pretty(game)?;
        write(&save_path, serialized)?;
        log::info!("Game saved successfully as {}", game.save.savename);

        if !self.available_saves.contains(&game.save.savename) {
            self.available_saves.push(game.save.savename.clone());
            self.available_saves.sort();
        }
        Ok(save_path)
    }

    pub fn load_from_file(&self, save_name: &str) -> Result<SaveGame> {
        let path = self.save_path(save_name);
        if !path.is_file() {
            return Err(SaveError::NotFound(save_name.to_string()));
        }
        let file = File::open(&path)?;
        let game: SaveGame = serde_json::from_reader(file).map_err(|source| SaveError::Corrupted {
            name: save_name.to_string(),
            source,
        })?;
        log::info!("Loaded save {save_name}: {game:#?}");
        Ok(game)
    }

    fn ensure_save_dir(&self) -> Result<()> {
        if self.save_dir.exists() && !self.save_dir.is_dir() {
            return Err(SaveError::NotADirectory(self.save_dir.clone()));
        }
        create_dir_all(&self.save_dir).map_err(|source| SaveError::CreateDir {
            path: self.save_dir.clone(),
            source,
        })
    }
}

pub fn current_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
