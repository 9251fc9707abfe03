pub mod labels;
mod output;
pub mod view;

pub use labels::{Labels, UiLanguage};
pub use output::{indicator_bar, spinner, spinner_error, spinner_success};
pub use view::{Controls, ReportView};
