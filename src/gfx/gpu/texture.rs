use std::ffi::c_void;
use std::ptr;

use anyhow::bail;

use gl::types::*;

use super::{Bindable, Format};

/// Texture object
#[derive(Debug, PartialEq)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub handle: u32,
}

impl Texture {
    /// Create a new texture from tightly packed pixels
    pub fn new(
        width: usize,
        height: usize,
        format: Format,
        pixels: &[u8],
    ) -> anyhow::Result<Self> {
        if pixels.len() < width * height * 4 {
            bail!("Expected {}x{} pixels, got {} bytes", width, height, pixels.len());
        }
        Self::allocate(width, height, format, pixels.as_ptr() as *const c_void)
    }

    /// Create a texture with undefined contents, used as a render target
    pub fn empty(width: usize, height: usize, format: Format) -> anyhow::Result<Self> {
        Self::allocate(width, height, format, ptr::null())
    }

    fn allocate(
        width: usize,
        height: usize,
        format: Format,
        pixels: *const c_void,
    ) -> anyhow::Result<Self> {
        let (pixel_format, pixel_type) = format.texture_format()?;
        let handle = unsafe {
            let mut handle = 0u32;
            gl::GenTextures(1, &mut handle as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, handle);
            {
                gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
                gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
                gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
                gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
                // Frame rows are not guaranteed to be 4-byte aligned after decoding
                gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

                gl::TexImage2D(
                    gl::TEXTURE_2D,
                    0,
                    pixel_format as i32,
                    width as i32,
                    height as i32,
                    0,
                    pixel_format,
                    pixel_type,
                    pixels,
                );
            }
            gl::BindTexture(gl::TEXTURE_2D, 0);

            handle
        };
        Ok(Self {
            width,
            height,
            handle,
        })
    }

    /// Bind the texture to a texture slot
    /// NOTE: Shader bindings must be set to the texture slot index!
    pub fn bind_at(&self, index: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + index);
            gl::BindTexture(gl::TEXTURE_2D, self.handle);
        }
    }
}

impl Bindable for Texture {
    fn bind(&self) {
        unsafe { gl::BindTexture(gl::TEXTURE_2D, self.handle) }
    }
    fn unbind(&self) {
        unsafe { gl::BindTexture(gl::TEXTURE_2D, 0) }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.handle) }
    }
}

/// Framebuffer object with a single color texture
/// Keeps its contents between frames until resized
#[derive(Debug)]
pub struct Framebuffer {
    handle: u32,
    pub color: Texture,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> anyhow::Result<Self> {
        let color = Texture::empty(width, height, Format::R8g8b8a8_uint)?;
        unsafe {
            let mut handle = 0u32;
            gl::GenFramebuffers(1, &mut handle);
            gl::BindFramebuffer(gl::FRAMEBUFFER, handle);
            gl::FramebufferTexture2D(
                gl::FRAMEBUFFER,
                gl::COLOR_ATTACHMENT0,
                gl::TEXTURE_2D,
                color.handle,
                0,
            );
            let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
            if status == gl::FRAMEBUFFER_COMPLETE {
                // A fresh target starts cleared, like a freshly sized canvas
                gl::ClearColor(0.0, 0.0, 0.0, 0.0);
                gl::Clear(gl::COLOR_BUFFER_BIT);
            }
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
            if status != gl::FRAMEBUFFER_COMPLETE {
                gl::DeleteFramebuffers(1, &handle);
                bail!("Incomplete framebuffer (status {:#x})", status);
            }
            Ok(Self { handle, color })
        }
    }

    /// Copy the contents onto the window's default framebuffer
    pub fn blit_to_default(&self, width: i32, height: i32) {
        let src_width = self.color.width as i32;
        let src_height = self.color.height as i32;
        unsafe {
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, self.handle);
            gl::BindFramebuffer(gl::DRAW_FRAMEBUFFER, 0);
            gl::BlitFramebuffer(
                0,
                0,
                src_width,
                src_height,
                0,
                0,
                width,
                height,
                gl::COLOR_BUFFER_BIT,
                gl::NEAREST,
            );
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
        }
    }
}

impl Bindable for Framebuffer {
    fn bind(&self) {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, self.handle) }
    }
    fn unbind(&self) {
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, 0) }
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        unsafe { gl::DeleteFramebuffers(1, &self.handle) }
    }
}
