pub mod analysis;
pub mod decode;
pub mod source;
pub mod spectrogram;
pub mod window;
