pub mod info;
pub mod play;
