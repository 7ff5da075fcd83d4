pub mod error;
pub mod helpers;

pub use error::ErrorModal;
