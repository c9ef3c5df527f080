pub mod app;
pub mod app_state;
pub mod character;
pub mod console;
pub mod descriptions;
pub mod error;
pub mod logging;
pub mod menu;
pub mod point_buy;
pub mod save;
pub mod settings;
pub mod special;

// Re-export commonly used items for easier access
pub use app::App;
pub use character::{Basics, Character, Gender, Race};
pub use console::{Console, LineConsole};
pub use error::{AppError, Result};
pub use point_buy::{PointBuyEditor, Rejection, Response};
pub use save::{SaveGame, SaveManager};
pub use settings::Settings;
pub use special::{Special, SpecialError, SpecialStat};
