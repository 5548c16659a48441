pub mod frame_buffer;
pub mod image_io;
pub mod source;
