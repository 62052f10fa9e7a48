mod app;
mod logging;

pub use app::Segue;
pub use logging::init_logging;
