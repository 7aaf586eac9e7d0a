pub mod layout;
pub mod renderer;
pub mod terminal;

pub use renderer::render_plain_report;
pub use terminal::run_ui;
