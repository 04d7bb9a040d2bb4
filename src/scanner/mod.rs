use crate::error::{Error, Result};
use crate::interfaces::camera::CameraPermission;
use crate::observability::metrics::{SCANS_ACCEPTED, SCANS_IGNORED};
use crate::observability::tracing::trace_scan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Pending,
    Granted,
    Denied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeKind {
    Qr,
    Pdf417,
    Aztec,
    DataMatrix,
    Ean13,
    Ean8,
    Code39,
    Code128,
}

impl BarcodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeKind::Qr => "qr",
            BarcodeKind::Pdf417 => "pdf417",
            BarcodeKind::Aztec => "aztec",
            BarcodeKind::DataMatrix => "datamatrix",
            BarcodeKind::Ean13 => "ean13",
            BarcodeKind::Ean8 => "ean8",
            BarcodeKind::Code39 => "code39",
            BarcodeKind::Code128 => "code128",
        }
    }
}

impl FromStr for BarcodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "qr" => Ok(BarcodeKind::Qr),
            "pdf417" => Ok(BarcodeKind::Pdf417),
            "aztec" => Ok(BarcodeKind::Aztec),
            "datamatrix" => Ok(BarcodeKind::DataMatrix),
            "ean13" => Ok(BarcodeKind::Ean13),
            "ean8" => Ok(BarcodeKind::Ean8),
            "code39" => Ok(BarcodeKind::Code39),
            "code128" => Ok(BarcodeKind::Code128),
            _ => Err(Error::UnknownBarcodeType(s.to_string())),
        }
    }
}

impl fmt::Display for BarcodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded code, surfaced to the user as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanResult {
    pub kind: BarcodeKind,
    pub payload: String,
}

impl ScanResult {
    pub fn notice(&self, currency_symbol: &str) -> String {
        format!("{} {} to be paid", self.payload, currency_symbol)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScannerView {
    RequestingPermission,
    NoAccess,
    Scanning,
    Scanned,
}

/// Camera scan gate: accepts one decode, then stays closed until `reset`.
#[derive(Clone, Debug)]
pub struct Scanner {
    permission: PermissionStatus,
    scanned: bool,
    accepted: Vec<BarcodeKind>,
}

impl Scanner {
    pub fn new(accepted: Vec<BarcodeKind>) -> Self {
        Scanner {
            permission: PermissionStatus::Pending,
            scanned: false,
            accepted,
        }
    }

    /// Resolves the permission once; later calls return the stored outcome.
    pub async fn request_permission<P>(&mut self, provider: &P) -> PermissionStatus
    where
        P: CameraPermission + Sync + ?Sized,
    {
        if self.permission != PermissionStatus::Pending {
            return self.permission;
        }

        let status = provider.request_permission().await;
        match status {
            PermissionStatus::Granted => tracing::info!("Camera permission granted"),
            PermissionStatus::Denied => tracing::warn!("Camera permission denied"),
            PermissionStatus::Pending => tracing::debug!("Camera permission still pending"),
        }
        self.permission = status;
        status
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    pub fn is_scanned(&self) -> bool {
        self.scanned
    }

    pub fn accepts(&self, kind: BarcodeKind) -> bool {
        self.accepted.contains(&kind)
    }

    /// Whether decode events are currently being delivered.
    pub fn ensure_ready(&self) -> Result<()> {
        match self.permission {
            PermissionStatus::Granted => Ok(()),
            PermissionStatus::Denied => Err(Error::PermissionDenied),
            PermissionStatus::Pending => Err(Error::PermissionPending),
        }
    }

    /// Handle a decode event from the camera.
    pub fn on_decoded(&mut self, kind: BarcodeKind, payload: &str) -> Option<ScanResult> {
        let _span = trace_scan(kind).entered();

        let ignored = if self.ensure_ready().is_err() {
            Some("not_ready")
        } else if self.scanned {
            Some("already_scanned")
        } else if !self.accepts(kind) {
            Some("unsupported_type")
        } else {
            None
        };

        if let Some(reason) = ignored {
            tracing::debug!(reason, "Decode ignored");
            SCANS_IGNORED.with_label_values(&[reason]).inc();
            return None;
        }

        self.scanned = true;
        SCANS_ACCEPTED.inc();
        tracing::info!(payload_len = payload.len(), "Code scanned");

        Some(ScanResult {
            kind,
            payload: payload.to_string(),
        })
    }

    /// Re-arm the gate ("Tap to Scan Again").
    pub fn reset(&mut self) {
        self.scanned = false;
    }

    pub fn view(&self) -> ScannerView {
        match (self.permission, self.scanned) {
            (PermissionStatus::Pending, _) => ScannerView::RequestingPermission,
            (PermissionStatus::Denied, _) => ScannerView::NoAccess,
            (PermissionStatus::Granted, false) => ScannerView::Scanning,
            (PermissionStatus::Granted, true) => ScannerView::Scanned,
        }
    }
}

impl fmt::Display for ScannerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ScannerView::RequestingPermission => "Requesting for camera permission",
            ScannerView::NoAccess => "No access to camera",
            ScannerView::Scanning => "Scanning...",
            ScannerView::Scanned => "Tap to Scan Again",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::camera::StaticPermission;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingPermission {
        calls: AtomicUsize,
        outcome: PermissionStatus,
    }

    #[async_trait::async_trait]
    impl CameraPermission for CountingPermission {
        async fn request_permission(&self) -> PermissionStatus {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome
        }
    }

    fn default_scanner() -> Scanner {
        Scanner::new(vec![BarcodeKind::Qr, BarcodeKind::Pdf417])
    }

    #[tokio::test]
    async fn test_gate_holds_until_reset() {
        let mut scanner = default_scanner();
        scanner.request_permission(&StaticPermission(PermissionStatus::Granted)).await;
        assert_eq!(scanner.view(), ScannerView::Scanning);

        let first = scanner.on_decoded(BarcodeKind::Qr, "12.5").unwrap();
        assert_eq!(first.payload, "12.5");
        assert_eq!(first.notice("SOL"), "12.5 SOL to be paid");
        assert_eq!(scanner.view(), ScannerView::Scanned);

        assert_eq!(scanner.on_decoded(BarcodeKind::Qr, "12.5"), None);
        assert_eq!(scanner.on_decoded(BarcodeKind::Pdf417, "other"), None);

        scanner.reset();
        assert_eq!(scanner.view(), ScannerView::Scanning);
        let second = scanner.on_decoded(BarcodeKind::Pdf417, "  raw text ").unwrap();
        assert_eq!(second.payload, "  raw text ");
    }

    #[tokio::test]
    async fn test_denied_permission_blocks_decodes() {
        let mut scanner = default_scanner();
        assert_eq!(scanner.view(), ScannerView::RequestingPermission);
        assert!(matches!(scanner.ensure_ready(), Err(Error::PermissionPending)));
        assert_eq!(scanner.on_decoded(BarcodeKind::Qr, "early"), None);

        let status = scanner.request_permission(&StaticPermission(PermissionStatus::Denied)).await;
        assert_eq!(status, PermissionStatus::Denied);
        assert_eq!(scanner.view(), ScannerView::NoAccess);
        assert_eq!(scanner.view().to_string(), "No access to camera");
        assert!(matches!(scanner.ensure_ready(), Err(Error::PermissionDenied)));
        assert_eq!(scanner.on_decoded(BarcodeKind::Qr, "payload"), None);
        assert!(!scanner.is_scanned());
    }

    #[tokio::test]
    async fn test_permission_resolves_once() {
        let provider = CountingPermission {
            calls: AtomicUsize::new(0),
            outcome: PermissionStatus::Granted,
        };
        let mut scanner = default_scanner();

        scanner.request_permission(&provider).await;
        scanner.request_permission(&provider).await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(scanner.permission(), PermissionStatus::Granted);
    }

    #[tokio::test]
    async fn test_unsupported_kind_is_ignored() {
        let mut scanner = default_scanner();
        scanner.request_permission(&StaticPermission(PermissionStatus::Granted)).await;

        assert_eq!(scanner.on_decoded(BarcodeKind::Ean13, "4006381333931"), None);
        assert_eq!(scanner.view(), ScannerView::Scanning);
        assert!(scanner.on_decoded(BarcodeKind::Qr, "ok").is_some());
    }

    #[test]
    fn test_barcode_kind_from_str() {
        assert_eq!("QR".parse::<BarcodeKind>().unwrap(), BarcodeKind::Qr);
        assert_eq!("pdf417".parse::<BarcodeKind>().unwrap(), BarcodeKind::Pdf417);
        assert!(matches!("morse".parse::<BarcodeKind>(), Err(Error::UnknownBarcodeType(_))));
    }
}
