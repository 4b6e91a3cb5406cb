pub mod descriptor;
pub mod encoder;
pub mod image;
pub mod matcher;
