// Service exports
pub mod inventory;
pub mod sessions;

pub use inventory::{
    export_file_name, load_inventory, load_inventory_file, write_recommendations_csv,
    InventoryError,
};
pub use sessions::{Session, SessionError, SessionStore};
