//! sb-io: output muxing -- tagged 7.1.4 WAV and downmixed 5.1 AAC delivery

mod aac;
mod error;
mod wav;

pub use aac::write_aac_51;
pub use error::{MuxError, MuxResult};
pub use wav::{write_pcm24, write_wav_714};
