mod add;
mod common;
mod delete;
mod edit;
mod list;
mod search;
mod show;
mod sync;

pub use add::run_add;
pub use common::resolve_data_dir;
pub use delete::run_delete;
pub use edit::run_edit;
pub use list::run_list;
pub use search::run_search;
pub use show::run_show;
pub use sync::{run_disable, run_enable, run_pull, run_push, run_status};
