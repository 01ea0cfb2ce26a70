pub mod dburl;
pub mod ensure;
pub mod error;
pub mod prereq;
pub mod render;
pub mod settings;
pub mod wait;

pub use ensure::Ensure;
pub use error::{OpsError, Result};
pub use settings::Settings;
