use std::ffi::c_void;
use std::marker::PhantomData;
use std::mem::size_of;
use std::ptr;

use gl::types::*;

use super::Bindable;

/// GPU buffer with a fixed element capacity
/// Every `upload` replaces the whole contents
#[derive(Debug)]
pub struct DynamicBuffer<T> {
    handle: GLuint,
    target: GLenum,
    capacity: usize,
    len: usize,
    _element: PhantomData<T>,
}

impl<T: Copy> DynamicBuffer<T> {
    /// Allocate room for `capacity` elements bound to `target`
    pub fn new(target: GLenum, capacity: usize) -> Self {
        let handle = unsafe {
            let mut handle: GLuint = 0;
            gl::GenBuffers(1, &mut handle);
            gl::BindBuffer(target, handle);
            gl::BufferData(
                target,
                (capacity * size_of::<T>()) as GLsizeiptr,
                ptr::null(),
                gl::DYNAMIC_DRAW,
            );
            gl::BindBuffer(target, 0);
            handle
        };
        Self {
            handle,
            target,
            capacity,
            len: 0,
            _element: PhantomData,
        }
    }

    /// Allocate a buffer sized to and filled with `data`
    pub fn with_data(target: GLenum, data: &[T]) -> Self {
        let mut buffer = Self::new(target, data.len());
        buffer.upload(data);
        buffer
    }

    /// Number of elements written by the last upload
    pub fn len(&self) -> usize {
        self.len
    }

    /// Replace the buffer contents
    /// NOTE: Panics if `data` does not fit the capacity
    pub fn upload(&mut self, data: &[T]) {
        assert!(data.len() <= self.capacity);
        if !data.is_empty() {
            unsafe {
                gl::BindBuffer(self.target, self.handle);
                gl::BufferSubData(
                    self.target,
                    0,
                    (data.len() * size_of::<T>()) as GLsizeiptr,
                    data.as_ptr() as *const c_void,
                );
                gl::BindBuffer(self.target, 0);
            }
        }
        self.len = data.len();
    }

    /// Attach the first element to an indexed binding point
    /// NOTE: Only meaningful for uniform buffers
    pub fn bind_base(&self, binding: u32) {
        unsafe {
            gl::BindBufferRange(
                self.target,
                binding,
                self.handle,
                0,
                size_of::<T>() as GLsizeiptr,
            );
        }
    }
}

impl<T> Bindable for DynamicBuffer<T> {
    fn bind(&self) {
        unsafe { gl::BindBuffer(self.target, self.handle) }
    }

    fn unbind(&self) {
        unsafe { gl::BindBuffer(self.target, 0) }
    }
}

impl<T> Drop for DynamicBuffer<T> {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.handle) }
    }
}

/// Vertex Array Object, records the attribute layout and index buffer
#[derive(Debug)]
pub struct VertexArray(GLuint);

impl VertexArray {
    pub fn new() -> Self {
        let mut handle: GLuint = 0;
        unsafe { gl::GenVertexArrays(1, &mut handle) };
        Self(handle)
    }
}

impl Bindable for VertexArray {
    fn bind(&self) {
        unsafe { gl::BindVertexArray(self.0) }
    }

    fn unbind(&self) {
        unsafe { gl::BindVertexArray(0) }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe { gl::DeleteVertexArrays(1, &self.0) }
    }
}
