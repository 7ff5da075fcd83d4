pub mod combobox;
pub mod details;
pub mod footer;
pub mod header;
pub mod modals;
