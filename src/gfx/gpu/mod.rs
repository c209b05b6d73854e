mod buffer;
mod pipeline;
mod texture;
mod types;

pub use buffer::*;
pub use pipeline::*;
pub use texture::*;
pub use types::*;
