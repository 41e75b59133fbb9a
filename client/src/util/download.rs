//! CSV export download via an object-URL blob.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

/// `expenses_<yyyy-MM-dd>.csv` for an ISO-8601 timestamp or date.
pub fn export_filename(iso_now: &str) -> String {
    let date = iso_now.get(..10).unwrap_or(iso_now);
    format!("expenses_{date}.csv")
}

/// Today's date as an ISO-8601 string (UTC), empty outside the browser.
pub fn today_iso() -> String {
    #[cfg(feature = "csr")]
    {
        js_sys::Date::new_0().to_iso_string().into()
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}

/// Offer `body` to the user as a file download.
///
/// # Errors
///
/// Returns a description of the DOM call that failed.
pub fn save_text(filename: &str, mime: &str, body: &str) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::{JsCast, JsValue};

        let parts = js_sys::Array::of1(&JsValue::from_str(body));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime);
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
            .map_err(|e| format!("blob: {e:?}"))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("object url: {e:?}"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| "no document".to_owned())?;
        let anchor = document
            .create_element("a")
            .map_err(|e| format!("anchor: {e:?}"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "anchor cast failed".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();
        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (filename, mime, body);
        Err("downloads need a browser".to_owned())
    }
}
