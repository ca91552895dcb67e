mod npy_signal_encoder;
mod process_signal_encoder;
mod signal_encoder_factory;

pub use npy_signal_encoder::NpySignalEncoder;
pub use process_signal_encoder::{ProcessSignalEncoder, pair_by_stem, parse_output_paths};
pub use signal_encoder_factory::SignalEncoderFactory;
