use std::ffi::CString;
use std::ptr;

use anyhow::{bail, Context};

use gl::types::*;

use super::Bindable;

/// Bytes reserved for a compile or link log
const INFO_LOG_LEN: usize = 1024;

/// Compiled shader stage, only needed until the pipeline is linked
#[derive(Debug)]
pub struct Shader(GLuint);

impl Shader {
    pub fn vertex(code: &str) -> anyhow::Result<Self> {
        Self::compile(gl::VERTEX_SHADER, code).context("Failed to compile vertex shader")
    }

    pub fn fragment(code: &str) -> anyhow::Result<Self> {
        Self::compile(gl::FRAGMENT_SHADER, code).context("Failed to compile fragment shader")
    }

    fn compile(stage: GLenum, code: &str) -> anyhow::Result<Self> {
        let source = CString::new(code).context("Shader source contains a NUL byte")?;
        unsafe {
            let handle = gl::CreateShader(stage);
            gl::ShaderSource(handle, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(handle);

            let mut status = gl::FALSE as GLint;
            gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut status);
            if status != gl::TRUE as GLint {
                let log = info_log(|len, buffer| {
                    gl::GetShaderInfoLog(handle, len, ptr::null_mut(), buffer)
                });
                gl::DeleteShader(handle);
                bail!(log);
            }
            Ok(Self(handle))
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.0) }
    }
}

/// Linked shader program
#[derive(Debug)]
pub struct Pipeline {
    program: GLuint,
}

impl Pipeline {
    pub fn new(shaders: &[&Shader]) -> anyhow::Result<Self> {
        unsafe {
            let program = gl::CreateProgram();
            for shader in shaders {
                gl::AttachShader(program, shader.0);
            }
            gl::LinkProgram(program);

            let mut status = gl::FALSE as GLint;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            if status != gl::TRUE as GLint {
                let log = info_log(|len, buffer| {
                    gl::GetProgramInfoLog(program, len, ptr::null_mut(), buffer)
                });
                gl::DeleteProgram(program);
                bail!("Failed to link pipeline: {}", log);
            }
            Ok(Self { program })
        }
    }

    /// Point a named uniform block at a buffer binding index
    pub fn bind_uniform_block(&self, name: &str, binding: u32) -> anyhow::Result<()> {
        let block = CString::new(name).context("Uniform block name contains a NUL byte")?;
        unsafe {
            let index = gl::GetUniformBlockIndex(self.program, block.as_ptr());
            if index == gl::INVALID_INDEX {
                bail!("Uniform block {} not found", name);
            }
            gl::UniformBlockBinding(self.program, index, binding);
        }
        Ok(())
    }
}

impl Bindable for Pipeline {
    fn bind(&self) {
        unsafe { gl::UseProgram(self.program) }
    }

    fn unbind(&self) {
        unsafe { gl::UseProgram(0) }
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program) }
    }
}

unsafe fn info_log<F>(read: F) -> String
where
    F: FnOnce(GLsizei, *mut GLchar),
{
    let mut buffer = vec![0u8; INFO_LOG_LEN];
    read(INFO_LOG_LEN as GLsizei, buffer.as_mut_ptr() as *mut GLchar);
    String::from_utf8_lossy(&buffer)
        .trim_end_matches('\0')
        .trim_end()
        .to_string()
}
