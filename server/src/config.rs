//! Static content served by the stub endpoints.
//!
//! Every value the endpoints return lives here so a deployment can override
//! the URLs with a YAML file instead of a rebuild. Defaults match the
//! production frame registration.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use piggyworld_types::api::{
    FrameActionResponse, FrameButton, FrameDescriptor, FrameUpdate, Manifest,
    WalletConnectResponse,
};
use piggyworld_types::casino::{MOCK_WALLET_ADDRESS, MOCK_WALLET_BALANCE};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app_name: String,
    pub home_url: String,
    pub icon_url: String,
    pub splash_background_color: String,
    pub action_message: String,
    pub action_image_url: String,
    pub action_button_label: String,
    pub action_button_target: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "PIGGY WORLD".to_string(),
            home_url: "https://v0-farcaster-app-test-publish.vercel.app".to_string(),
            icon_url:
                "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/testiconUrl.png"
                    .to_string(),
            splash_background_color: "#000000".to_string(),
            action_message: "Welcome to PIGGY WORLD!".to_string(),
            action_image_url: "https://piggy-world.vercel.app/images/back-piggy.png".to_string(),
            action_button_label: "Open app".to_string(),
            action_button_target: "https://piggy-world.vercel.app".to_string(),
        }
    }
}

impl Config {
    /// Load from a YAML file. Missing keys fall back to the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Manifest consumed by the hosting frame client.
    pub fn manifest(&self) -> Manifest {
        Manifest {
            frame: FrameDescriptor {
                version: "1".to_string(),
                name: self.app_name.clone(),
                home_url: self.home_url.clone(),
                icon_url: self.icon_url.clone(),
                splash_image_url: self.icon_url.clone(),
                splash_background_color: self.splash_background_color.clone(),
                screenshot_urls: vec![self.icon_url.clone()],
            },
        }
    }

    /// Fixed mock result for wallet connection.
    pub fn wallet_response(&self) -> WalletConnectResponse {
        WalletConnectResponse {
            success: true,
            address: MOCK_WALLET_ADDRESS.to_string(),
            balance: MOCK_WALLET_BALANCE,
        }
    }

    /// Fixed acknowledgment frame for any action payload.
    pub fn action_response(&self) -> FrameActionResponse {
        FrameActionResponse {
            status: "success".to_string(),
            message: self.action_message.clone(),
            frames: FrameUpdate {
                version: "next".to_string(),
                image: self.action_image_url.clone(),
                buttons: vec![FrameButton {
                    label: self.action_button_label.clone(),
                    action: "link".to_string(),
                    target: self.action_button_target.clone(),
                }],
            },
        }
    }
}
