mod http_inference_gateway;

pub use http_inference_gateway::HttpInferenceGateway;
