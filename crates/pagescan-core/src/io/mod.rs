pub mod image_io;
pub mod memory;
pub mod sequence;

pub use memory::MemorySource;
pub use sequence::ImageSequenceSource;
