use std::sync::Arc;

use ndarray::Array2;
use ndarray_npy::ReadNpyExt;
use serde_json::json;

use medigate::application::ports::{EncoderError, SignalEncoder};
use medigate::application::services::{
    NO_SIGNALS_MESSAGE, PredictionError, SignalPipelineOptions, SignalPredictionService,
};
use medigate::domain::{ModelTag, UploadedFile};
use medigate::infrastructure::encoding::NpySignalEncoder;
use medigate::infrastructure::staging::ScratchStaging;

use crate::helpers::{
    FailingEncoder, LossyEncoder, MockGateway, ecg_json, entry_count, mat_v5_double,
};

fn options(channel_count: usize) -> SignalPipelineOptions {
    SignalPipelineOptions {
        channel_count,
        target_samples: 1000,
        downsample_factor: None,
    }
}

fn service(
    scratch: &tempfile::TempDir,
    encoder: Arc<dyn SignalEncoder>,
    gateway: Arc<MockGateway>,
    options: SignalPipelineOptions,
) -> SignalPredictionService {
    let staging = Arc::new(ScratchStaging::new(scratch.path().to_path_buf()).unwrap());
    SignalPredictionService::new(staging, encoder, gateway, options)
}

fn decode_npy(bytes: &[u8]) -> Array2<f64> {
    Array2::<f64>::read_npy(bytes).unwrap()
}

fn decode_npy_values(bytes: &[u8]) -> Vec<f64> {
    decode_npy(bytes).iter().copied().collect()
}

#[tokio::test]
async fn given_two_ecg_files_when_predicting_then_gateway_receives_downsampled_arrays() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({"data": [{"label": "normal"}]}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(2));

    let files = vec![
        UploadedFile::new("patient_a.json", "application/json", ecg_json(2, 5000)),
        UploadedFile::new("patient_b.json", "application/json", ecg_json(2, 5000)),
    ];

    let result = svc.predict("req-1", files).await.unwrap();

    assert_eq!(result, json!({"data": [{"label": "normal"}]}));

    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, ModelTag::HeartDisease);
    let names: Vec<&str> = calls[0].files.iter().map(|f| f.original_name.as_str()).collect();
    assert_eq!(names, vec!["patient_a.npy", "patient_b.npy"]);

    let array = decode_npy(&calls[0].files[0].bytes);
    assert_eq!(array.dim(), (1000, 2));
    // row i holds (channel0[i*5], channel1[i*5])
    assert_eq!(array[[0, 0]], 0.0);
    assert_eq!(array[[0, 1]], 10_000.0);
    assert_eq!(array[[1, 0]], 5.0);
    assert_eq!(array[[1, 1]], 10_005.0);

    assert_eq!(entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_fixed_factor_when_predicting_then_uses_it_instead_of_target() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({"ok": true}));
    let opts = SignalPipelineOptions {
        downsample_factor: Some(10),
        ..options(1)
    };
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), opts);

    let file = UploadedFile::new("short.json", "application/json", ecg_json(1, 100));
    svc.predict("req-2", vec![file]).await.unwrap();

    let encoded = &gateway.calls()[0].files[0].bytes;
    assert_eq!(decode_npy_values(encoded).len(), 10);
}

#[tokio::test]
async fn given_signal_at_target_length_when_predicting_then_passes_through_unchanged() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(1));

    let file = UploadedFile::new("ready.json", "application/json", ecg_json(1, 1000));
    svc.predict("req-3", vec![file]).await.unwrap();

    let values = decode_npy_values(&gateway.calls()[0].files[0].bytes);
    assert_eq!(values.len(), 1000);
    assert_eq!(values[999], 999.0);
}

#[tokio::test]
async fn given_raw_i16_dat_file_when_predicting_then_decodes_interleaved_samples() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(2));

    let samples: Vec<i16> = (0..2000).map(|i| i as i16).collect();
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    let file = UploadedFile::new("holter.dat", "application/octet-stream", bytes);

    svc.predict("req-4", vec![file]).await.unwrap();

    let values = decode_npy_values(&gateway.calls()[0].files[0].bytes);
    assert_eq!(values.len(), 2000);
    assert_eq!(&values[..4], &[0.0, 1.0, 2.0, 3.0]);
}

#[tokio::test]
async fn given_no_files_when_predicting_then_returns_validation_error() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(2));

    let result = svc.predict("req-5", vec![]).await;

    assert!(matches!(result, Err(PredictionError::Validation(ref m)) if m == NO_SIGNALS_MESSAGE));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn given_encoder_failure_when_predicting_then_returns_conversion_error_and_cleans_up() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(FailingEncoder), gateway.clone(), options(2));

    let file = UploadedFile::new("a.json", "application/json", ecg_json(2, 2000));
    let result = svc.predict("req-6", vec![file]).await;

    assert!(matches!(
        result,
        Err(PredictionError::Conversion(EncoderError::ConversionFailed(_)))
    ));
    assert!(gateway.calls().is_empty());
    assert_eq!(entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_encoder_dropping_an_output_when_predicting_then_returns_mismatch_error() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(LossyEncoder), gateway.clone(), options(2));

    let files = vec![
        UploadedFile::new("a.json", "application/json", ecg_json(2, 2000)),
        UploadedFile::new("b.json", "application/json", ecg_json(2, 2000)),
    ];
    let result = svc.predict("req-7", files).await;

    assert!(matches!(
        result,
        Err(PredictionError::Conversion(EncoderError::MismatchedOutput(_)))
    ));
    assert_eq!(entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_gateway_failure_when_predicting_then_scratch_directory_is_emptied() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::failing("connection refused");
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway, options(2));

    let file = UploadedFile::new("a.json", "application/json", ecg_json(2, 2000));
    let result = svc.predict("req-8", vec![file]).await;

    assert!(matches!(result, Err(PredictionError::Gateway(_))));
    assert_eq!(entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_unsupported_extension_when_predicting_then_returns_unsupported_format() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway, options(12));

    let file = UploadedFile::new("record.edf", "application/octet-stream", vec![0u8; 64]);
    let result = svc.predict("req-9", vec![file]).await;

    assert!(matches!(result, Err(PredictionError::UnsupportedFormat(ref n)) if n == "record.edf"));
    assert_eq!(entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_malformed_json_when_predicting_then_returns_invalid_signal_naming_file() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway, options(2));

    let file = UploadedFile::new("broken.json", "application/json", b"{not json".to_vec());
    let result = svc.predict("req-10", vec![file]).await;

    match result {
        Err(PredictionError::InvalidSignal { filename, .. }) => assert_eq!(filename, "broken.json"),
        other => panic!("expected InvalidSignal, got {:?}", other),
    }
}

#[tokio::test]
async fn given_zero_decimation_factor_when_predicting_then_returns_invalid_signal() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let opts = SignalPipelineOptions {
        downsample_factor: Some(0),
        ..options(2)
    };
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway, opts);

    let file = UploadedFile::new("a.json", "application/json", ecg_json(2, 50));
    let result = svc.predict("req-11", vec![file]).await;

    assert!(matches!(result, Err(PredictionError::InvalidSignal { .. })));
}

#[tokio::test]
async fn given_duplicate_names_in_one_request_when_predicting_then_both_are_forwarded() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(1));

    let files = vec![
        UploadedFile::new("ecg.json", "application/json", ecg_json(1, 1000)),
        UploadedFile::new("ecg.json", "application/json", ecg_json(1, 2000)),
    ];
    svc.predict("req-12", files).await.unwrap();

    let forwarded = &gateway.calls()[0].files;
    assert_eq!(forwarded.len(), 2);
    assert_eq!(forwarded[0].bytes.len(), forwarded[1].bytes.len());
}

#[tokio::test]
async fn given_mat_file_with_channel_rows_when_predicting_then_decodes_and_downsamples() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(2));

    // 2 x 2000, value = channel * 10000 + sample, stored column-major
    let values: Vec<f64> = (0..2000)
        .flat_map(|s| (0..2).map(move |c| (c * 10_000 + s) as f64))
        .collect();
    let file = UploadedFile::new(
        "record.mat",
        "application/octet-stream",
        mat_v5_double("val", 2, 2000, &values),
    );

    svc.predict("req-13", vec![file]).await.unwrap();

    let forwarded = &gateway.calls()[0].files[0];
    assert_eq!(forwarded.original_name, "record.npy");
    let array = decode_npy(&forwarded.bytes);
    assert_eq!(array.dim(), (1000, 2));
    assert_eq!(array[[1, 0]], 2.0);
    assert_eq!(array[[1, 1]], 10_002.0);
    assert_eq!(entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_unreadable_mat_file_when_predicting_then_returns_invalid_signal() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(12));

    let file = UploadedFile::new("record.mat", "application/octet-stream", vec![0u8; 64]);
    let result = svc.predict("req-14", vec![file]).await;

    assert!(matches!(
        result,
        Err(PredictionError::InvalidSignal { ref filename, .. }) if filename == "record.mat"
    ));
    assert!(gateway.calls().is_empty());
    assert_eq!(entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_signal_not_reducible_to_target_when_predicting_then_rejects_before_gateway() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(1));

    let file = UploadedFile::new("a.json", "application/json", ecg_json(1, 1999));
    let result = svc.predict("req-15", vec![file]).await;

    match result {
        Err(PredictionError::InvalidSignal { filename, reason }) => {
            assert_eq!(filename, "a.json");
            assert!(reason.contains("1999"));
        }
        other => panic!("expected InvalidSignal, got {:?}", other),
    }
    assert!(gateway.calls().is_empty());
    assert_eq!(entry_count(scratch.path()), 0);
}

#[tokio::test]
async fn given_signal_shorter_than_target_when_predicting_then_returns_invalid_signal() {
    let scratch = tempfile::TempDir::new().unwrap();
    let gateway = MockGateway::responding(json!({}));
    let svc = service(&scratch, Arc::new(NpySignalEncoder), gateway.clone(), options(1));

    let file = UploadedFile::new("short.json", "application/json", ecg_json(1, 600));
    let result = svc.predict("req-16", vec![file]).await;

    assert!(matches!(result, Err(PredictionError::InvalidSignal { .. })));
    assert!(gateway.calls().is_empty());
}
