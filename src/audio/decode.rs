use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::source::{SampleSource, StreamSpec};
use crate::error::StreamError;
use crate::format::{format_duration, format_samples};

/// Container-level facts about the decoded track, for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioMetadata {
    pub codec: String,
    pub sample_rate: u32,
    pub channels: usize,
    pub total_frames: Option<u64>,
    pub bits_per_sample: Option<u32>,
}

impl AudioMetadata {
    /// One-line summary, e.g. `'pcm_s16le', 44100 Hz, 2 ch, 16-bit, 10s (441.0kspl)`.
    pub fn to_pretty_string(&self) -> String {
        let depth = match self.bits_per_sample {
            Some(bits) => format!("{}-bit", bits),
            None => "?-bit".to_string(),
        };
        let length = match self.total_frames {
            Some(frames) if self.sample_rate > 0 => format!(
                "{} ({})",
                format_duration(frames as f64 / self.sample_rate as f64),
                format_samples(frames)
            ),
            _ => "unknown length".to_string(),
        };
        format!(
            "'{}', {} Hz, {} ch, {}, {}",
            self.codec, self.sample_rate, self.channels, depth, length
        )
    }
}

/// Streaming symphonia decoder. Each chunk is one decoded packet.
pub struct SymphoniaSource {
    format: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    metadata: AudioMetadata,
    chunk: Option<SampleBuffer<f32>>,
    finished: bool,
}

impl SymphoniaSource {
    pub fn open(path: &Path) -> Result<Self, StreamError> {
        let file = std::fs::File::open(path).map_err(|source| StreamError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
            .map_err(StreamError::Probe)?;

        let format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(StreamError::NoTrack)?;

        let track_id = track.id;
        let params = track.codec_params.clone();
        let channels = params
            .channels
            .map(|c| c.count())
            .ok_or(StreamError::MissingParameter("channel layout"))?;
        let sample_rate = params
            .sample_rate
            .ok_or(StreamError::MissingParameter("sample rate"))?;

        let codec = symphonia::default::get_codecs()
            .get_codec(params.codec)
            .map(|d| d.short_name.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let decoder = symphonia::default::get_codecs().make(&params, &DecoderOptions::default())?;

        let metadata = AudioMetadata {
            codec,
            sample_rate,
            channels,
            total_frames: params.n_frames,
            bits_per_sample: params.bits_per_sample,
        };

        log::debug!("Opened {}: track {}", path.display(), track_id);

        Ok(Self {
            format,
            decoder,
            track_id,
            metadata,
            chunk: None,
            finished: false,
        })
    }

    pub fn metadata(&self) -> &AudioMetadata {
        &self.metadata
    }
}

impl SampleSource for SymphoniaSource {
    fn spec(&self) -> StreamSpec {
        StreamSpec {
            sample_rate: self.metadata.sample_rate,
            channels: self.metadata.channels,
            total_frames: self.metadata.total_frames,
        }
    }

    fn next_chunk(&mut self) -> Result<Option<&[f32]>, StreamError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let packet = match self.format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    self.finished = true;
                    self.chunk = None;
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            // Corrupt packets are faults here: skipping them would shift
            // every later frame in time.
            let decoded = self.decoder.decode(&packet)?;
            let num_frames = decoded.frames();
            if num_frames == 0 {
                continue;
            }

            let spec = *decoded.spec();
            let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
            sample_buf.copy_interleaved_ref(decoded);
            self.chunk = Some(sample_buf);
            break;
        }

        Ok(self.chunk.as_ref().map(|buf| buf.samples()))
    }
}
