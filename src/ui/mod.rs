pub mod menu;
pub mod output;
pub mod progress;
pub mod signals;

pub use menu::{run_menu, Menu};
pub use output::{OutputFormatter, OutputMode};
pub use progress::ProgressManager;
pub use signals::GracefulShutdown;
