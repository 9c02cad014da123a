pub mod app;
pub mod state;
pub mod surface;
pub mod theme;
pub mod window;
