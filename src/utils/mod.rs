//! Utility modules shared by build and serve.

pub mod fs;
pub mod html;
pub mod mime;
