// app_state.rs

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppState {
    MainMenu,
    NewGame,
    LoadMenu,
    SettingsMenu,
    About,
    Exit,
}
