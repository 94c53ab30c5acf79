//! Wire types for the HTTP stub surface.
//!
//! Field names must match the hosting frame client's expected schema
//! bit-exactly, so every descriptor renames to camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Top-level mini-app manifest served to the hosting client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub frame: FrameDescriptor,
}

/// Frame metadata block of the manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDescriptor {
    pub version: String,
    pub name: String,
    pub home_url: String,
    pub icon_url: String,
    pub splash_image_url: String,
    pub splash_background_color: String,
    pub screenshot_urls: Vec<String>,
}

/// Response of the stub wallet-connect endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnectResponse {
    pub success: bool,
    pub address: String,
    pub balance: u64,
}

/// Acknowledgment returned for any frame action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameActionResponse {
    pub status: String,
    pub message: String,
    pub frames: FrameUpdate,
}

/// Replacement frame state embedded in the acknowledgment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameUpdate {
    pub version: String,
    pub image: String,
    pub buttons: Vec<FrameButton>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameButton {
    pub label: String,
    pub action: String,
    pub target: String,
}
