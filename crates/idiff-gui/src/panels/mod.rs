pub mod controls;
pub mod status;
pub mod viewport;
