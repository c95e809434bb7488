//! カメラセッション
//!
//! `getUserMedia` で取得したストリームを保持する。`Drop` で全トラックを停止するので、
//! 撮影・キャンセル・コンポーネント破棄のどの経路でもデバイスは必ず解放される。

use circuit_guard_common::{Error, Result};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack};

use crate::api::gemini::js_error_message;
use crate::capture::encode::encode_video_frame;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VideoConstraints {
    facing_mode: &'static str,
}

pub struct CameraSession {
    stream: MediaStream,
}

impl CameraSession {
    /// 背面カメラを要求して開く
    ///
    /// 拒否・デバイスなしはすべて `DeviceAccessDenied`。
    pub async fn open() -> Result<Self> {
        let media_devices = gloo::utils::window()
            .navigator()
            .media_devices()
            .map_err(|e| denied(&e))?;

        let video = serde_wasm_bindgen::to_value(&VideoConstraints { facing_mode: "environment" })
            .map_err(|e| denied(&e.into()))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video);

        let promise = media_devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| denied(&e))?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| denied(&e))?
            .dyn_into()
            .map_err(|e| denied(&e))?;

        log::debug!("camera opened: {} track(s)", stream.get_tracks().length());
        Ok(Self { stream })
    }

    pub fn attach(&self, video: &HtmlVideoElement) {
        video.set_src_object(Some(&self.stream));
    }

    /// 現在のフレームを JPEG Data URL として取得
    pub fn capture(&self, video: &HtmlVideoElement) -> Result<String> {
        encode_video_frame(video)
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        log::debug!("camera released");
    }
}

fn denied(cause: &JsValue) -> Error {
    log::warn!("camera unavailable: {}", js_error_message(cause));
    Error::DeviceAccessDenied
}
