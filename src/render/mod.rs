pub mod palette;
pub mod pipeline;
pub mod scale;
