use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{window, Location, Url, UrlSearchParams};

const CASINO_BASE_URL_KEY: &str = "casinoBaseUrl";

pub fn get_graphql_url() -> String {
    // Baked in at build time, e.g. GRAPHQL_URL=https://api.example.com/graphql trunk build
    if let Some(url) = option_env!("GRAPHQL_URL") {
        return url.to_string();
    }

    if let Some(window) = window() {
        if let Ok(origin) = window.location().origin() {
            return format!("{}/graphql", origin);
        }
    }

    // Default to 127.0.0.1 for development
    "http://127.0.0.1:4000/graphql".to_string()
}

pub fn get_subscription_url() -> String {
    http_to_ws(&get_graphql_url())
}

/// Swaps an `http(s)://` URL for its `ws(s)://` counterpart.
pub fn http_to_ws(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        url.to_string()
    }
}

/// Reads `name` out of the `#a=b&c=d` fragment of the page URL.
fn hash_param(name: &str) -> Option<String> {
    let hash = window()?.location().hash().ok()?;
    let params = UrlSearchParams::new_with_str(hash.trim_start_matches('#')).ok()?;
    params.get(name).filter(|value| !value.is_empty())
}

pub fn get_user_token() -> Option<String> {
    hash_param("userToken")
}

// location.ancestorOrigins is missing from some browsers and from web-sys
fn last_ancestor_origin(location: &Location) -> Option<String> {
    let origins = js_sys::Reflect::get(location, &JsValue::from_str("ancestorOrigins")).ok()?;
    if origins.is_undefined() || origins.is_null() {
        return None;
    }
    let len = js_sys::Reflect::get(&origins, &JsValue::from_str("length"))
        .ok()?
        .as_f64()? as u32;
    if len == 0 {
        return None;
    }
    js_sys::Reflect::get_u32(&origins, len - 1).ok()?.as_string()
}

/// Finds the casino embedding this page and returns its origin.
///
/// Looks at, in order: the `#casinoBaseUrl=` fragment (debug builds), the
/// outermost ancestor origin, the referrer when it isn't this page, and the
/// value cached in session storage (debug builds). The first parseable one
/// wins and is cached for reloads.
pub fn get_casino_base_url() -> Option<String> {
    let window = window()?;
    let location = window.location();
    let current_origin = location.origin().ok();
    let storage = window.session_storage().ok().flatten();

    let referrer = window
        .document()
        .map(|document| document.referrer())
        .filter(|referrer| !referrer.is_empty() && Some(referrer) != current_origin.as_ref());

    let candidates = [
        if cfg!(debug_assertions) { hash_param(CASINO_BASE_URL_KEY) } else { None },
        last_ancestor_origin(&location),
        referrer,
        if cfg!(debug_assertions) {
            storage
                .as_ref()
                .and_then(|s| s.get_item(CASINO_BASE_URL_KEY).ok().flatten())
        } else {
            None
        },
    ];

    let (raw, url) = candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| Url::new(&candidate).ok().map(|url| (candidate, url)))?;

    if let Some(storage) = storage {
        let _ = storage.set_item(CASINO_BASE_URL_KEY, &raw);
    }
    debug!("Casino base URL: {}", url.origin());
    Some(url.origin())
}
