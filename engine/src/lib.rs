pub mod app;
pub mod graphics;
pub mod pixels_renderer;
pub mod surface;
pub mod ui;
