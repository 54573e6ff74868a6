pub mod pii;
pub mod version;

pub use pii::Masked;
