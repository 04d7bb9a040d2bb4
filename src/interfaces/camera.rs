use crate::scanner::PermissionStatus;
use async_trait::async_trait;

#[async_trait]
pub trait CameraPermission {
    /// Ask the platform for camera access. Resolves once with the outcome.
    async fn request_permission(&self) -> PermissionStatus;
}

/// Permission provider that answers with a preset outcome.
#[derive(Clone, Copy, Debug)]
pub struct StaticPermission(pub PermissionStatus);

#[async_trait]
impl CameraPermission for StaticPermission {
    async fn request_permission(&self) -> PermissionStatus {
        self.0
    }
}
