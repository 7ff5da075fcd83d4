pub mod combobox;
pub mod error;
pub mod highlight;
pub mod models;
pub mod options;
pub mod scroll;
pub mod search;
