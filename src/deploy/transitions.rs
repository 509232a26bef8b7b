// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::archive::Archive;
use crate::cloud::{FunctionsApi, ObjectLocation, ObjectStorage, SignedUrlUpload};

use super::Deployment;
use super::error::DeployError;
use super::state::{Initialized, Located, Packaged, Patched, Uploaded};
use super::strategy::UploadStrategy;

// =============================================================================
// Initialized -> Located
// =============================================================================

impl Deployment<Initialized> {
    /// Fetch the existing function resource.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::FunctionNotFound` for any lookup failure, including
    /// transport and authentication errors. The cause is kept as the source.
    #[must_use = "deployment state must be used"]
    pub async fn locate<R: FunctionsApi>(
        self,
        client: &R,
    ) -> Result<Deployment<Located>, DeployError> {
        let name = self.function_path();
        tracing::info!("Deploying function: {name}");

        let function = client.get_function(&name).await.map_err(|e| {
            tracing::error!("Failed to get cloud function: {e}");
            DeployError::FunctionNotFound {
                function: self.config.function_name.clone(),
                source: e,
            }
        })?;

        tracing::info!(
            "Found existing cloud function: {}",
            self.config.function_name
        );
        if self.config.debug_mode {
            tracing::debug!("Function Definition: {function:#?}");
        }

        Ok(Deployment {
            config: self.config,
            state: Located { function },
        })
    }
}

// =============================================================================
// Located -> Packaged
// =============================================================================

impl Deployment<Located> {
    /// Zip the configured source directory.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Package` if the directory cannot be read or zipped.
    #[must_use = "deployment state must be used"]
    pub async fn package(self) -> Result<Deployment<Packaged>, DeployError> {
        let archive = Archive::from_directory_blocking(self.config.source_directory.clone()).await?;

        Ok(Deployment {
            config: self.config,
            state: Packaged {
                function: self.state.function,
                archive,
            },
        })
    }
}

// =============================================================================
// Packaged -> Uploaded
// =============================================================================

impl Deployment<Packaged> {
    /// Upload the archive using the strategy the function resource calls for.
    ///
    /// With an archive URL the bucket object is overwritten in place. Without
    /// one an upload URL is generated, the archive is PUT there, and the
    /// function's `sourceUploadUrl` is set to it.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::UploadUrlGeneration` if no upload URL could be
    /// obtained, `DeployError::Upload` if the transfer itself failed.
    #[must_use = "deployment state must be used"]
    pub async fn upload<R>(self, client: &R) -> Result<Deployment<Uploaded>, DeployError>
    where
        R: FunctionsApi + ObjectStorage + SignedUrlUpload,
    {
        let Packaged {
            mut function,
            archive,
        } = self.state;
        let strategy = UploadStrategy::for_function(&function);

        match &strategy {
            UploadStrategy::ArchiveUrl(archive_url) => {
                tracing::info!("Uploading source code using archive URL: {archive_url}");
                let location = ObjectLocation::parse(archive_url).map_err(upload_failed)?;
                client
                    .write_object(&location, archive.bytes())
                    .await
                    .map_err(upload_failed)?;
                tracing::info!(
                    "Source code object {} uploaded to bucket {}",
                    location.object,
                    location.bucket
                );
            }
            UploadStrategy::UploadUrl => {
                let upload_url = client
                    .generate_upload_url(&self.config.parent())
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to generate upload URL: {e}");
                        DeployError::UploadUrlGeneration(e)
                    })?;
                tracing::info!("Generated upload URL for source code");

                tracing::info!("Uploading source code using upload URL");
                client
                    .put_archive(&upload_url, archive.bytes())
                    .await
                    .map_err(upload_failed)?;
                function.source_upload_url = Some(upload_url);
            }
        }

        Ok(Deployment {
            config: self.config,
            state: Uploaded {
                function,
                archive,
                strategy,
            },
        })
    }
}

fn upload_failed(err: crate::cloud::ApiError) -> DeployError {
    tracing::error!("Failed to upload source code: {err}");
    DeployError::Upload(err)
}

// =============================================================================
// Uploaded -> Patched
// =============================================================================

impl Deployment<Uploaded> {
    /// Send the updated resource back to the platform.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Patch` if the platform rejects the update.
    #[must_use = "deployment state must be used"]
    pub async fn patch<R: FunctionsApi>(
        self,
        client: &R,
    ) -> Result<Deployment<Patched>, DeployError> {
        tracing::info!("Patching cloud function...");
        let name = self.function_path();

        let operation = client
            .patch_function(&name, &self.state.function)
            .await
            .map_err(DeployError::Patch)?;

        tracing::info!("Successfully patched Cloud Function");
        tracing::info!(
            "Operation Name: {}",
            operation.name.as_deref().unwrap_or("<none>")
        );
        if self.config.debug_mode {
            tracing::debug!("Response: {operation:#?}");
        }

        let Uploaded {
            function,
            archive,
            strategy,
        } = self.state;

        Ok(Deployment {
            config: self.config,
            state: Patched {
                function,
                archive,
                strategy,
                operation,
            },
        })
    }
}
