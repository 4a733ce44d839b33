pub mod app;
pub mod preview;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::SmolimgApp;
