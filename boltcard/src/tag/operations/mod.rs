/// ReadData, WriteData and the capability container.
pub mod data;
/// Application select and chip UID.
pub mod identity;
/// Key versions and key changes.
pub mod key;
/// File settings.
pub mod settings;

pub use data::{read_capabilities_container, read_file_data, write_file_data};
pub use identity::{get_chip_uid, select_ndef_application};
pub use key::{change_key, get_key_version};
pub use settings::{change_file_settings, get_file_settings};
