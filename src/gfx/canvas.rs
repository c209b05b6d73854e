use std::mem::size_of;
use std::ptr;

use cgmath::*;
use log::debug;
use memoffset::offset_of;

use super::gpu::*;
use super::{Image, Surface};

const VERTEX_SHADER: &str = r#"
#version 330 core

layout(std140) uniform Matrices
{
    mat4 projection;
};

layout(location=0) in vec2 a_pos;
layout(location=1) in vec2 a_uv;

out vec2 v_uv;

void main() {
    v_uv = a_uv;
    gl_Position = projection * vec4(a_pos, 0.0, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
#version 330 core

in vec2 v_uv;

layout(location=0) out vec4 o_frag;

uniform sampler2D u_texture;

void main()
{
    o_frag = texture(u_texture, v_uv);
}
"#;

/// Uniform block binding index of the projection matrix
const MATRICES_BINDING: u32 = 0;

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 3, 2];

/// Persistent OpenGL drawing surface
/// Draws land in an off-screen target, which `present` copies to the window
/// every refresh. Resizing recreates (and so clears) the target.
#[derive(Debug)]
pub struct GlCanvas {
    width: u32,
    height: u32,
    target: Framebuffer,
    pipeline: Pipeline,
    uniforms: DynamicBuffer<Uniforms>,
    indices: DynamicBuffer<u16>,
    vertices: DynamicBuffer<Vertex>,
    vertex_array: VertexArray,
}

impl GlCanvas {
    /// Create a canvas of the given size
    /// NOTE: Requires a current GL context
    pub fn new(width: u32, height: u32) -> anyhow::Result<Self> {
        let vs = Shader::vertex(VERTEX_SHADER)?;
        let fs = Shader::fragment(FRAGMENT_SHADER)?;
        let pipeline = Pipeline::new(&[&vs, &fs])?;
        pipeline.bind_uniform_block("Matrices", MATRICES_BINDING)?;

        let uniforms: DynamicBuffer<Uniforms> = DynamicBuffer::new(gl::UNIFORM_BUFFER, 1);
        let indices = DynamicBuffer::with_data(gl::ELEMENT_ARRAY_BUFFER, &QUAD_INDICES);
        let vertices: DynamicBuffer<Vertex> = DynamicBuffer::new(gl::ARRAY_BUFFER, 4);

        let vertex_array = {
            let vao = VertexArray::new();
            vao.bind();
            {
                vertices.bind();
                VertexLayout::bind(&VERTEX_LAYOUT);
                indices.bind();
            }
            vao.unbind();
            vao
        };

        let target = Framebuffer::new(width.max(1) as usize, height.max(1) as usize)?;

        Ok(Self {
            width,
            height,
            target,
            pipeline,
            uniforms,
            indices,
            vertices,
            vertex_array,
        })
    }

    fn projection(&self) -> Matrix4<f32> {
        // Top-left origin, y down, in surface pixels
        ortho(0.0, self.width as f32, self.height as f32, 0.0, -1.0, 1.0)
    }
}

impl Surface for GlCanvas {
    type Texture = Texture;

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        // A minimized window reports 0x0, keep the last target until it comes back
        if width == 0 || height == 0 {
            self.width = width;
            self.height = height;
            return;
        }
        match Framebuffer::new(width as usize, height as usize) {
            Ok(target) => {
                debug!("Canvas resized to {}x{}", width, height);
                self.target = target;
                self.width = width;
                self.height = height;
            }
            Err(err) => log::error!("Failed to resize canvas to {}x{}: {:#}", width, height, err),
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn upload(&mut self, image: &Image) -> anyhow::Result<Texture> {
        let (width, height) = image.dimensions();
        Texture::new(
            width,
            height,
            Format::R8g8b8a8_uint,
            &image.pixels,
        )
    }

    fn draw_image(&mut self, texture: &Texture, pos: Vector2<f32>, size: Vector2<f32>) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        self.vertices.upload(&[
            Vertex { pos, uv: vec2(0.0, 0.0) },
            Vertex { pos: pos + vec2(size.x, 0.0), uv: vec2(1.0, 0.0) },
            Vertex { pos: pos + size, uv: vec2(1.0, 1.0) },
            Vertex { pos: pos + vec2(0.0, size.y), uv: vec2(0.0, 1.0) },
        ]);
        let projection = self.projection();
        self.uniforms.upload(&[Uniforms { projection }]);

        self.target.bind();
        unsafe {
            gl::Viewport(0, 0, self.width as i32, self.height as i32);
        }
        self.pipeline.bind();
        self.vertex_array.bind();
        self.uniforms.bind_base(MATRICES_BINDING);
        texture.bind_at(0);
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                self.indices.len() as i32,
                gl::UNSIGNED_SHORT,
                ptr::null(),
            );
        }
        texture.unbind();
        self.vertex_array.unbind();
        self.pipeline.unbind();
        self.target.unbind();
    }

    fn present(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        unsafe {
            gl::Viewport(0, 0, self.width as i32, self.height as i32);
            gl::ClearColor(0.0, 0.0, 0.0, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        self.target
            .blit_to_default(self.width as i32, self.height as i32);
    }
}

/// Vertex structure for the canvas quad
#[derive(Debug, Copy, Clone)]
#[repr(C)]
struct Vertex {
    pos: Vector2<f32>,
    uv: Vector2<f32>,
}

/// Layout descriptor for the vertex structure
const VERTEX_LAYOUT: [VertexLayout; 2] = [
    VertexLayout {
        format: Format::R32g32_float,
        stride: size_of::<Vertex>(),
        offset: offset_of!(Vertex, pos),
    },
    VertexLayout {
        format: Format::R32g32_float,
        stride: size_of::<Vertex>(),
        offset: offset_of!(Vertex, uv),
    },
];

/// Uniform structure for the projection block
#[derive(Copy, Clone, Debug)]
#[repr(C)]
struct Uniforms {
    projection: Matrix4<f32>,
}
