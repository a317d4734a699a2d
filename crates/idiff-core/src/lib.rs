pub mod consts;
pub mod error;
pub mod composite;
pub mod external;
pub mod flicker;
pub mod image_io;
pub mod settings;
pub mod signal;
pub mod slider;
pub mod sync;
pub mod view;
pub mod viewport;
pub mod views;
pub mod window;

pub use error::{IdiffError, Result};
