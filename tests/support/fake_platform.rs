// ABOUTME: In-memory cloud platform that records every call.
// ABOUTME: Behavior (missing function, failing steps) is configured per test.

use async_trait::async_trait;
use bytes::Bytes;
use gcf_deploy::cloud::{
    ApiError, FunctionResource, FunctionsApi, ObjectLocation, ObjectStorage, Operation, Platform,
    SignedUrlUpload,
};
use gcf_deploy::credentials::ServiceAccountKey;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One recorded platform call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetFunction(String),
    GenerateUploadUrl(String),
    WriteObject {
        location: ObjectLocation,
        data: Bytes,
    },
    PutArchive {
        url: String,
        data: Bytes,
    },
    PatchFunction {
        name: String,
        function: FunctionResource,
    },
}

/// How the fake platform answers.
#[derive(Debug, Clone)]
pub struct Behavior {
    /// `None` answers the lookup with HTTP 404.
    pub function: Option<FunctionResource>,
    pub connect_fails: bool,
    pub generate_upload_url_status: Option<u16>,
    pub put_status: u16,
    pub write_status: u16,
    pub patch_status: u16,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            function: Some(FunctionResource {
                name: Some(
                    "projects/test-project/locations/us-central1/functions/test-function"
                        .to_string(),
                ),
                ..Default::default()
            }),
            connect_fails: false,
            generate_upload_url_status: None,
            put_status: 200,
            write_status: 200,
            patch_status: 200,
        }
    }
}

impl Behavior {
    /// A function that already stores its source at `archive_url`.
    pub fn with_archive_url(archive_url: &str) -> Self {
        let mut behavior = Self::default();
        if let Some(function) = behavior.function.as_mut() {
            function.source_archive_url = Some(archive_url.to_string());
        }
        behavior
    }
}

#[derive(Clone, Default)]
pub struct FakePlatform {
    pub behavior: Behavior,
    calls: Arc<Mutex<Vec<Call>>>,
    connects: Arc<AtomicUsize>,
    upload_urls: Arc<AtomicUsize>,
}

impl FakePlatform {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            ..Default::default()
        }
    }

    /// A client sharing this platform's call log, without counting a connect.
    pub fn client(&self) -> FakeClient {
        FakeClient {
            platform: self.clone(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Bytes handed to either upload path, in call order.
    pub fn uploaded(&self) -> Vec<Bytes> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::WriteObject { data, .. } | Call::PutArchive { data, .. } => Some(data),
                _ => None,
            })
            .collect()
    }

    /// Resources sent in patch calls, in call order.
    pub fn patched(&self) -> Vec<FunctionResource> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::PatchFunction { function, .. } => Some(function),
                _ => None,
            })
            .collect()
    }
}

impl Platform for FakePlatform {
    type Client = FakeClient;

    fn connect(&self, _key: ServiceAccountKey) -> Result<FakeClient, ApiError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.behavior.connect_fails {
            return Err(status_error("fake://connect", 401));
        }
        Ok(FakeClient {
            platform: self.clone(),
        })
    }
}

pub struct FakeClient {
    platform: FakePlatform,
}

impl FakeClient {
    fn record(&self, call: Call) {
        self.platform.calls.lock().unwrap().push(call);
    }
}

pub fn status_error(url: &str, status: u16) -> ApiError {
    ApiError::Status {
        url: url.to_string(),
        status,
        body: String::new(),
    }
}

fn check(url: &str, status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(status_error(url, status))
    }
}

#[async_trait]
impl FunctionsApi for FakeClient {
    async fn get_function(&self, name: &str) -> Result<FunctionResource, ApiError> {
        self.record(Call::GetFunction(name.to_string()));
        self.platform
            .behavior
            .function
            .clone()
            .ok_or_else(|| status_error(name, 404))
    }

    async fn generate_upload_url(&self, parent: &str) -> Result<String, ApiError> {
        self.record(Call::GenerateUploadUrl(parent.to_string()));
        if let Some(status) = self.platform.behavior.generate_upload_url_status {
            return Err(status_error(parent, status));
        }
        let n = self.platform.upload_urls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://upload.example.com/signed/{n}"))
    }

    async fn patch_function(
        &self,
        name: &str,
        function: &FunctionResource,
    ) -> Result<Operation, ApiError> {
        self.record(Call::PatchFunction {
            name: name.to_string(),
            function: function.clone(),
        });
        check(name, self.platform.behavior.patch_status)?;
        Ok(Operation {
            name: Some("operations/fake-op".to_string()),
            ..Default::default()
        })
    }
}

#[async_trait]
impl ObjectStorage for FakeClient {
    async fn write_object(&self, location: &ObjectLocation, data: Bytes) -> Result<(), ApiError> {
        self.record(Call::WriteObject {
            location: location.clone(),
            data,
        });
        check(&location.to_string(), self.platform.behavior.write_status)
    }
}

#[async_trait]
impl SignedUrlUpload for FakeClient {
    async fn put_archive(&self, upload_url: &str, data: Bytes) -> Result<(), ApiError> {
        self.record(Call::PutArchive {
            url: upload_url.to_string(),
            data,
        });
        check(upload_url, self.platform.behavior.put_status)
    }
}
