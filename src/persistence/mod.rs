pub mod files;
pub mod store;

pub use files::{
    atomic_write, ensure_data_dir, get_data_dir, init_local_dir, json_export_file,
    log_export_file, settings_file, tasks_file,
};
pub use store::{JsonStore, StoreError, TaskStore};
