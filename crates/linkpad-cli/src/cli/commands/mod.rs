//! CLI command handlers. Each command is in its own file for clarity.

mod add;
mod category;
mod completions;
mod edit;
mod fetch_icon;
mod icon;
mod list;
mod remove;

pub use add::run_add;
pub use category::run_category;
pub use completions::run_completions;
pub use edit::run_edit;
pub use fetch_icon::run_fetch_icon;
pub use icon::IconArgs;
pub use list::run_list;
pub use remove::run_remove;
