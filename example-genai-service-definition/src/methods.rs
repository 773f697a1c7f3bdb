mod generate;
mod get_history;
mod list_models;

pub use generate::Generate;
pub use get_history::GetHistory;
pub use list_models::ListModels;
