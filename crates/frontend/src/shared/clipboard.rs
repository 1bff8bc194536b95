//! Clipboard and native share helpers
//!
//! Both go through the browser APIs; failures are logged and reported to the
//! caller through the callback so the UI can show a muted message.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

async fn write_text(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = window.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text)).await.map(|_| ())
}

/// Copy text to the clipboard, then report whether it worked
pub fn copy_to_clipboard_with_callback<F>(text: &str, on_done: F)
where
    F: FnOnce(bool) + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        match write_text(&text).await {
            Ok(()) => on_done(true),
            Err(err) => {
                log::warn!("clipboard write failed: {:?}", err);
                on_done(false);
            }
        }
    });
}

/// Share through `navigator.share` when available, else copy the url
pub fn share_or_copy<F>(title: &str, url: &str, on_done: F)
where
    F: FnOnce(bool) + 'static,
{
    let title = title.to_owned();
    let url = url.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            on_done(false);
            return;
        };
        let navigator = window.navigator();
        let share = js_sys::Reflect::get(&navigator, &JsValue::from_str("share"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        if let Some(share) = share {
            let data = js_sys::Object::new();
            let _ = js_sys::Reflect::set(&data, &"title".into(), &title.as_str().into());
            let _ = js_sys::Reflect::set(&data, &"url".into(), &url.as_str().into());
            let shared = match share.call1(&navigator, &data) {
                Ok(promise) => match promise.dyn_into::<js_sys::Promise>() {
                    Ok(promise) => JsFuture::from(promise).await.is_ok(),
                    Err(_) => false,
                },
                Err(_) => false,
            };
            if shared {
                on_done(true);
                return;
            }
            log::debug!("native share unavailable or dismissed, copying instead");
        }
        match write_text(&url).await {
            Ok(()) => on_done(true),
            Err(err) => {
                log::warn!("clipboard write failed: {:?}", err);
                on_done(false);
            }
        }
    });
}
