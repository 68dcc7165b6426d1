use async_trait::async_trait;
use peakform::{
    Error, Result,
    llm::{AnalysisRequest, InferenceGateway},
};
use std::sync::{Arc, Mutex};

/// Mock gateway for testing. Records every request and answers with a fixed
/// response or error.
#[derive(Debug, Clone)]
pub struct MockGateway {
    pub requests: Arc<Mutex<Vec<AnalysisRequest>>>,
    pub response: String,
    pub error: Option<String>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::with_response("Mock analysis")
    }

    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response: response.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn get_requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceGateway for MockGateway {
    async fn generate(&self, request: AnalysisRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        Ok(self.response.clone())
    }
}
