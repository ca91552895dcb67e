mod conversion_job;
mod model_tag;
mod prediction_result;
mod signal_matrix;
mod uploaded_file;

pub use conversion_job::{ConversionJob, EncodedArtifact, stem_of};
pub use model_tag::ModelTag;
pub use prediction_result::{MISSING_PREDICTIONS_MESSAGE, PredictionResult};
pub use signal_matrix::{SignalError, SignalMatrix, decimation_factor, downsample};
pub use uploaded_file::UploadedFile;
