use std::ffi::c_void;

use anyhow::bail;

use gl::types::*;

/// Trait for GPU resources that must be bound/unbound to be used
pub trait Bindable {
    fn bind(&self);
    fn unbind(&self);
}

/// GPU format used for both vertex and texture types
/// Non-camel case types are used to make reading easier
/// Format: <channel><size in bits>..._type
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(non_camel_case_types)]
pub enum Format {
    R8g8b8a8_uint,
    R32g32_float,
}

/// OpenGL Vertex format
/// (member count, type, normalized)
pub type GLVertexFormat = (i32, GLenum, bool);

impl From<Format> for GLVertexFormat {
    fn from(format: Format) -> GLVertexFormat {
        match format {
            Format::R8g8b8a8_uint => (4, gl::UNSIGNED_BYTE, false),
            Format::R32g32_float => (2, gl::FLOAT, false),
        }
    }
}

/// OpenGL texture format
/// (format, type)
pub type GLTextureFormat = (GLenum, GLenum);

impl Format {
    pub fn texture_format(self) -> anyhow::Result<GLTextureFormat> {
        match self {
            Format::R8g8b8a8_uint => Ok((gl::RGBA, gl::UNSIGNED_BYTE)),
            _ => bail!("This format is invalid for textures {:?}", self),
        }
    }
}

/// Vertex layout struct
/// Used to describe vertex formats and layouts
#[derive(Debug)]
pub struct VertexLayout {
    pub format: Format,
    pub stride: usize,
    pub offset: usize,
}

impl VertexLayout {
    pub fn bind(layout: &[VertexLayout]) {
        unsafe {
            for (index, entry) in layout.iter().enumerate() {
                let (size, format, normalized): GLVertexFormat = entry.format.into();
                gl::EnableVertexAttribArray(index as u32);
                gl::VertexAttribPointer(
                    index as u32,
                    size,
                    format,
                    normalized as u8,
                    entry.stride as i32,
                    entry.offset as *const c_void,
                );
            }
        }
    }
}
