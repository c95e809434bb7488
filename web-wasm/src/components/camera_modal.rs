//! カメラ撮影モーダル
//!
//! マウント時にカメラを開き、アンマウントで `CameraSession` を破棄してトラックを止める。

use circuit_guard_common::Error;
use leptos::html::Video;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::capture::CameraSession;

#[component]
pub fn CameraModal<F>(
    open: RwSignal<bool>,
    error: RwSignal<Option<Error>>,
    on_capture: F,
) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    let video_ref = NodeRef::<Video>::new();
    let session = StoredValue::new_local(None::<CameraSession>);

    spawn_local(async move {
        match CameraSession::open().await {
            Ok(camera) => {
                // 既に閉じられていればクロージャごと破棄され、ここでトラックが止まる
                session.try_update_value(move |slot| {
                    if let Some(video) = video_ref.get_untracked() {
                        camera.attach(&video);
                    }
                    *slot = Some(camera);
                });
            }
            Err(err) => {
                error.try_set(Some(err));
                open.try_set(false);
            }
        }
    });

    on_cleanup(move || {
        session.try_update_value(|slot| slot.take());
    });

    let capture = move |_| {
        let frame = session.with_value(|slot| {
            slot.as_ref().zip(video_ref.get_untracked()).map(|(camera, video)| camera.capture(&video))
        });
        match frame {
            Some(Ok(data_url)) => {
                session.update_value(|slot| *slot = None);
                open.set(false);
                on_capture(data_url);
            }
            Some(Err(err)) => {
                log::warn!("frame capture failed: {}", err);
                error.set(Some(err));
            }
            None => log::debug!("capture requested before the camera was ready"),
        }
    };

    view! {
        <div class="camera-modal">
            <div class="camera-frame">
                <button class="camera-close" on:click=move |_| open.set(false)>"✕"</button>
                <div class="camera-viewport">
                    <video node_ref=video_ref autoplay=true playsinline=true muted=true />
                    <div class="camera-guide" />
                </div>
                <div class="camera-actions">
                    <button class="capture-button" on:click=capture>"CAPTURE UNIT DATA"</button>
                </div>
            </div>
        </div>
    }
}
