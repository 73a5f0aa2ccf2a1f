pub mod synthetic;
pub mod traits;

pub use synthetic::SyntheticSource;
pub use traits::RecordSource;
