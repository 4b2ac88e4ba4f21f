pub mod annotator;
pub mod artifact_writer;
pub mod image_decoder;
pub mod mosaic;
pub mod prompt_source;

pub use annotator::Annotator;
pub use artifact_writer::ArtifactWriter;
pub use image_decoder::ImageDecoder;
pub use mosaic::MosaicCompositor;
pub use prompt_source::PromptSource;
