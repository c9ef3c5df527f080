// /app.rs
use crate::{
    app_state::AppState,
    character::{self, Basics, Character},
    console::{Console, TEXT_WIDTH, Tone},
    descriptions,
    error::{AppError, Result},
    menu::{Menu, Selection},
    point_buy::PointBuyEditor,
    save::{SaveGame, SaveManager, SaveSlot},
    settings::Settings,
};

use std::path::PathBuf;

pub struct App<C: Console> {
    // Application state and control flow
    state: AppState,
    console: C,

    // --- Global information
    settings: Settings,
    settings_path: PathBuf,

    // --- GameState
    save_manager: SaveManager,
    current_save: Option<SaveGame>,
}

impl<C: Console> App<C> {
    pub fn new(console: C, settings: Settings, settings_path: impl Into<PathBuf>) -> Self {
        let save_manager = SaveManager::new(settings.save_dir.clone());
        Self {
            state: AppState::MainMenu,
            console,
            settings,
            settings_path: settings_path.into(),
            save_manager,
            current_save: None,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn current_save(&self) -> Option<&SaveGame> {
        self.current_save.as_ref()
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Runs menus until the player exits or input runs out.
    ///
    /// Save and load failures are reported and lead back to the main menu;
    /// only a broken console ends the loop with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let next = match self.state {
                AppState::MainMenu => self.main_menu(),
                AppState::NewGame => self.new_game(),
                AppState::LoadMenu => self.load_game(),
                AppState::SettingsMenu => self.settings_menu(),
                AppState::About => self.about(),
                AppState::Exit => {
                    self.console.println("Bye.")?;
                    log::info!("Postnuc exit: {}", chrono::Local::now());
                    return Ok(());
                }
            };

            self.state = match next {
                Ok(state) => state,
                Err(AppError::InputClosed) => AppState::Exit,
                Err(e @ AppError::IO(_)) => return Err(e),
                Err(e) => {
                    log::error!("{e:#?}");
                    self.console.error(&format!("Error: {e}"))?;
                    AppState::MainMenu
                }
            };
        }
    }

    fn main_menu(&mut self) -> Result<AppState> {
        let has_saves = match self.save_manager.refresh() {
            Ok(saves) => !saves.is_empty(),
            Err(e) => {
                log::error!("Failed to scan saves: {e:#?}");
                self.console.error(&format!("Error: {e}"))?;
                false
            }
        };

        let mut entries = vec![("New game", AppState::NewGame)];
        if has_saves {
            entries.push(("Load game", AppState::LoadMenu));
        }
        entries.extend([
            ("Settings", AppState::SettingsMenu),
            ("About", AppState::About),
            ("Exit", AppState::Exit),
        ]);

        let selection = Menu::builder("Main menu")
            .choices(entries.iter().map(|(caption, _)| *caption))
            .show(&mut self.console)?;

        Ok(match selection {
            Selection::Choice(index) => entries
                .get(index)
                .map_or(AppState::MainMenu, |(_, state)| *state),
            Selection::Back => AppState::MainMenu,
        })
    }

    // region:  --- New game

    fn new_game(&mut self) -> Result<AppState> {
        self.console
            .println(&descriptions::wrapped(descriptions::INTRO, TEXT_WIDTH))?;

        let basics = self.setup_basics()?;
        let special = PointBuyEditor::new().run(&mut self.console)?;
        let character = Character::new(basics, special);

        let Some(save_name) = self.allocate_save_name(character.name())? else {
            self.console.println("Returning to the main menu...")?;
            return Ok(AppState::MainMenu);
        };

        let game = SaveGame::new(save_name, character);
        let path = self.save_manager.save(&game)?;
        log::debug!("Save written to {}", path.display());
        self.console
            .say(&format!("Game saved as {}", game.save.savename), Tone::Hint)?;
        self.current_save = Some(game);

        Ok(AppState::MainMenu)
    }

    fn setup_basics(&mut self) -> Result<Basics> {
        let gender = character::choose_gender(&mut self.console)?;
        let name = character::ask_name(&mut self.console)?;
        let race = character::choose_race(&mut self.console)?;
        Ok(Basics::new(&name, gender, race)?)
    }

    // `None` when the player refuses to overwrite the last save.
    fn allocate_save_name(&mut self, name: &str) -> Result<Option<String>> {
        match self.save_manager.next_save_name(name) {
            SaveSlot::Free(save_name) => Ok(Some(save_name)),
            SaveSlot::LimitReached(last) => {
                self.console
                    .error(&format!("Save limit reached for your name ({name})!"))?;
                loop {
                    let answer = self.console.prompt("Overwrite the last save (y/n)?: ")?;
                    match answer.trim().to_lowercase().as_str() {
                        "y" => {
                            self.console.println("Overwriting the last save...")?;
                            log::info!("Overwriting save {last}");
                            return Ok(Some(last));
                        }
                        "n" => return Ok(None),
                        _ => continue,
                    }
                }
            }
        }
    }

    // endregion:  --- New game

    fn load_game(&mut self) -> Result<AppState> {
        let saves = self.save_manager.refresh()?.to_vec();
        if saves.is_empty() {
            self.console.println("No saves found.")?;
            return Ok(AppState::MainMenu);
        }

        let selection = Menu::builder("Choose a save")
            .choices(saves.iter().cloned())
            .back_choice(true)
            .show(&mut self.console)?;
        let Selection::Choice(index) = selection else {
            return Ok(AppState::MainMenu);
        };
        let Some(save_name) = saves.get(index) else {
            return Ok(AppState::MainMenu);
        };

        let game = self.save_manager.load_from_file(save_name)?;
        self.console.say(
            &format!(
                "Loaded {} (saved {})",
                game.save.savename, game.save.savetime
            ),
            Tone::Title,
        )?;
        for line in game.character.summary() {
            self.console.println(&line)?;
        }
        self.current_save = Some(game);

        Ok(AppState::MainMenu)
    }

    fn settings_menu(&mut self) -> Result<AppState> {
        loop {
            let selection = Menu::builder("Settings")
                .choice(format!("Colored output: {}", on_off(self.settings.color_output)))
                .choice(format!("Debug mode: {}", on_off(self.settings.debug_mode)))
                .back_choice(true)
                .show(&mut self.console)?;

            match selection {
                Selection::Choice(0) => {
                    self.settings.color_output = !self.settings.color_output;
                    self.console.set_color(self.settings.color_output);
                }
                Selection::Choice(1) => {
                    self.settings.debug_mode = !self.settings.debug_mode;
                    log::set_max_level(self.settings.log_level());
                }
                _ => return Ok(AppState::MainMenu),
            }

            log::info!("Settings changed: {:?}", self.settings);
            if let Err(e) = self.settings.save_to_file(&self.settings_path) {
                log::error!("Failed to save settings: {e:#?}");
                self.console.error(&format!("Error: {e}"))?;
            }
        }
    }

    fn about(&mut self) -> Result<AppState> {
        self.console.say(
            &format!("Postnuc v{}", env!("CARGO_PKG_VERSION")),
            Tone::Title,
        )?;
        self.console.println(env!("CARGO_PKG_DESCRIPTION"))?;
        self.console
            .println(&format!("Authors: {}", env!("CARGO_PKG_AUTHORS")))?;
        Ok(AppState::MainMenu)
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
