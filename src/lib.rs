pub mod bot;
pub mod game;
pub mod history;
pub mod ui;
