pub mod combobox;
pub mod search;
pub mod ui;
