//! Data URL への変換

use std::cell::RefCell;
use std::rc::Rc;

use circuit_guard_common::{Error, Result, CAPTURE_JPEG_QUALITY, CAPTURE_MIME_TYPE};
use futures::channel::oneshot;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, File, FileReader, HtmlCanvasElement, HtmlImageElement,
    HtmlVideoElement,
};

use crate::api::gemini::js_error_message;

/// onload / onerror のどちらかが発火するまで待つ
///
/// `attach` でハンドラを登録し、読込を開始する。成功なら true。
async fn wait_for_load<F>(attach: F) -> std::result::Result<bool, JsValue>
where
    F: FnOnce(&js_sys::Function, &js_sys::Function) -> std::result::Result<(), JsValue>,
{
    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let ok_tx = tx.clone();
    let onload = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = ok_tx.borrow_mut().take() {
            let _ = tx.send(true);
        }
    });
    let onerror = Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(false);
        }
    });

    attach(onload.as_ref().unchecked_ref(), onerror.as_ref().unchecked_ref())?;
    Ok(rx.await.unwrap_or(false))
}

/// 選択されたファイルを Data URL として読む
pub async fn read_file(file: &File) -> Result<String> {
    let read_failed = || Error::ImageLoad("Failed to read the selected file.".into());

    let reader = FileReader::new().map_err(|_| read_failed())?;
    let loaded = wait_for_load(|onload, onerror| {
        reader.set_onload(Some(onload));
        reader.set_onerror(Some(onerror));
        reader.read_as_data_url(file)
    })
    .await
    .map_err(|_| read_failed())?;
    reader.set_onload(None);
    reader.set_onerror(None);

    if !loaded {
        return Err(read_failed());
    }
    reader
        .result()
        .ok()
        .and_then(|value| value.as_string())
        .ok_or_else(read_failed)
}

/// 外部画像を読み込み、JPEG に再エンコードする
///
/// キャンバスを汚さないよう `crossOrigin = "anonymous"` で読み込む。
pub async fn load_remote_image(url: &str) -> Result<String> {
    let load_failed = || Error::ImageLoad("Failed to load demo image from remote source.".into());

    let image = HtmlImageElement::new().map_err(|_| load_failed())?;
    image.set_cross_origin(Some("anonymous"));
    let loaded = wait_for_load(|onload, onerror| {
        image.set_onload(Some(onload));
        image.set_onerror(Some(onerror));
        image.set_src(url);
        Ok(())
    })
    .await
    .map_err(|_| load_failed())?;
    image.set_onload(None);
    image.set_onerror(None);

    if !loaded {
        return Err(load_failed());
    }

    encode_jpeg(image.natural_width(), image.natural_height(), |ctx| {
        ctx.draw_image_with_html_image_element(&image, 0.0, 0.0)
    })
}

/// 動画の現在フレームを JPEG に変換する
pub fn encode_video_frame(video: &HtmlVideoElement) -> Result<String> {
    encode_jpeg(video.video_width(), video.video_height(), |ctx| {
        ctx.draw_image_with_html_video_element(video, 0.0, 0.0)
    })
}

fn encode_jpeg<F>(width: u32, height: u32, draw: F) -> Result<String>
where
    F: FnOnce(&CanvasRenderingContext2d) -> std::result::Result<(), JsValue>,
{
    if width == 0 || height == 0 {
        return Err(Error::ImageLoad("Image has no pixels to encode".into()));
    }
    let encode_failed =
        |e: JsValue| Error::ImageLoad(format!("Image encoding failed: {}", js_error_message(&e)));

    let canvas: HtmlCanvasElement = gloo::utils::document()
        .create_element("canvas")
        .map_err(encode_failed)?
        .dyn_into()
        .map_err(|e: web_sys::Element| encode_failed(e.into()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(encode_failed)?
        .ok_or_else(|| Error::ImageLoad("2D canvas context unavailable".into()))?
        .dyn_into()
        .map_err(|e: js_sys::Object| encode_failed(e.into()))?;

    draw(&ctx).map_err(encode_failed)?;

    canvas
        .to_data_url_with_type_and_encoder_options(CAPTURE_MIME_TYPE, &JsValue::from_f64(CAPTURE_JPEG_QUALITY))
        .map_err(encode_failed)
}
