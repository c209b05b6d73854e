mod canvas;
mod gpu;
mod image;

pub use self::image::*;
pub use canvas::*;
pub use gpu::*;

use cgmath::Vector2;

/// Drawing target owned by a screen
/// Contents persist between frames; resizing clears them
pub trait Surface {
    /// Surface-side copy of an uploaded image
    type Texture: 'static;

    fn resize(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    /// Make a decoded image drawable on this surface
    fn upload(&mut self, image: &Image) -> anyhow::Result<Self::Texture>;
    /// Paint a texture scaled into the rectangle at `pos` with `size`, in pixels
    fn draw_image(&mut self, texture: &Self::Texture, pos: Vector2<f32>, size: Vector2<f32>);
    /// Show the current contents on screen
    fn present(&mut self) {}
}
