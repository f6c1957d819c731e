use drift_core::SceneError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_error(path: &str, what: impl std::fmt::Debug) -> SceneError {
    SceneError::Fetch(format!("{}: {:?}", path, what))
}

/// GET `path` relative to the page and return the body as text.
pub async fn fetch_text(window: &web::Window, path: &str) -> Result<String, SceneError> {
    let resp = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| fetch_error(path, e))?;
    let resp: web::Response = resp.dyn_into().map_err(|e| fetch_error(path, e))?;
    if !resp.ok() {
        return Err(SceneError::Fetch(format!(
            "{}: HTTP {} {}",
            path,
            resp.status(),
            resp.status_text()
        )));
    }
    let text = resp.text().map_err(|e| fetch_error(path, e))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| fetch_error(path, e))?;
    text.as_string()
        .ok_or_else(|| SceneError::Fetch(format!("{}: body is not text", path)))
}
