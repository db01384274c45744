mod image_file;

pub use image_file::ImageFileCanvas;
