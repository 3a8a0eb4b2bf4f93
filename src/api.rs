//! Functions exported to inline page scripts.
//!
//! Every mutation re-renders the bound elements afterwards. Calls made before
//! `run_app` has installed the app are ignored.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use js_sys::{Object, Reflect};
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::models::{PrefValue, PreferenceSet};

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = RefCell::new(None);
}

pub(crate) fn install(app: Rc<App>) {
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    if let Err(e) = expose_global() {
        log::warn!("Could not publish window.{}: {:#}", GLOBAL_NAME, e);
    }
}

const GLOBAL_NAME: &str = "ozarkPrefs";

/// Publishes `window.ozarkPrefs` for inline scripts written against the old
/// page helper.
fn expose_global() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let api = Object::new();

    let methods: Vec<(&str, JsValue)> = vec![
        ("get", Closure::<dyn Fn(String) -> JsValue>::new(|key: String| get_pref(&key)).into_js_value()),
        ("set", Closure::<dyn Fn(String, JsValue)>::new(|key: String, value: JsValue| set_pref(&key, value)).into_js_value()),
        ("toggle", Closure::<dyn Fn(String) -> bool>::new(|key: String| toggle_pref(&key)).into_js_value()),
        ("getAll", Closure::<dyn Fn() -> JsValue>::new(get_prefs).into_js_value()),
        ("saveAll", Closure::<dyn Fn(JsValue)>::new(save_prefs).into_js_value()),
        ("clearAll", Closure::<dyn Fn()>::new(clear_all_prefs).into_js_value()),
        ("getPreferences", Closure::<dyn Fn() -> JsValue>::new(get_preferences).into_js_value()),
        (
            "toggleFlight",
            Closure::<dyn Fn(String) -> bool>::new(|id: String| toggle_flight_preference(&id)).into_js_value(),
        ),
        (
            "setDestination",
            Closure::<dyn Fn(String) -> JsValue>::new(|code: String| {
                set_destination_preference(&code).map_or(JsValue::NULL, |d| JsValue::from_str(&d))
            })
            .into_js_value(),
        ),
    ];
    for (name, method) in methods {
        Reflect::set(&api, &JsValue::from_str(name), &method)
            .map_err(|e| anyhow!("could not set {}: {:?}", name, e))?;
    }

    Reflect::set(&window, &JsValue::from_str(GLOBAL_NAME), &api)
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn with_app<R>(f: impl FnOnce(&App) -> R) -> Option<R> {
    let app = APP.with(|slot| slot.borrow().clone())?;
    Some(f(&app))
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Option<T> {
    // `undefined`, functions and symbols stringify to `undefined`, not a string.
    let json = js_sys::JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&json).ok()
}

fn pref_value(value: &JsValue) -> Option<PrefValue> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    if let Some(b) = value.as_bool() {
        return Some(PrefValue::Flag(b));
    }
    if let Some(s) = value.as_string() {
        return Some(PrefValue::Text(s));
    }
    from_js::<serde_json::Value>(value).map(PrefValue::Other)
}

#[wasm_bindgen(js_name = getPref)]
pub fn get_pref(key: &str) -> JsValue {
    with_app(|app| app.store().get(key))
        .flatten()
        .map_or(JsValue::UNDEFINED, |v| to_js(&v))
}

/// `null`, `undefined` and `false` remove the key. Numbers and plain objects are
/// stored as given.
#[wasm_bindgen(js_name = setPref)]
pub fn set_pref(key: &str, value: JsValue) {
    with_app(|app| {
        app.store().set(key, pref_value(&value));
        app.update_ui();
    });
}

#[wasm_bindgen(js_name = togglePref)]
pub fn toggle_pref(key: &str) -> bool {
    with_app(|app| {
        let active = app.store().toggle(key);
        app.update_ui();
        active
    })
    .unwrap_or(false)
}

/// The flag mapping only.
#[wasm_bindgen(js_name = getPrefs)]
pub fn get_prefs() -> JsValue {
    let flags = with_app(|app| app.store().get_all().flags).unwrap_or_default();
    to_js(&flags)
}

/// Replaces the flag mapping; destination and flights are kept.
#[wasm_bindgen(js_name = savePrefs)]
pub fn save_prefs(value: JsValue) {
    let mut flags: BTreeMap<String, PrefValue> = match from_js(&value) {
        Some(flags) => flags,
        None => {
            log::warn!("savePrefs expects a plain object");
            return;
        }
    };
    flags.retain(|_, v| !v.is_removal());
    with_app(|app| {
        let mut prefs = app.store().get_all();
        prefs.flags = flags;
        app.store().save_all(&prefs);
        app.update_ui();
    });
}

#[wasm_bindgen(js_name = getPreferences)]
pub fn get_preferences() -> JsValue {
    let prefs = with_app(|app| app.store().get_all()).unwrap_or_default();
    to_js(&prefs)
}

#[wasm_bindgen(js_name = savePreferences)]
pub fn save_preferences(value: JsValue) {
    let prefs: PreferenceSet = match from_js(&value) {
        Some(prefs) => prefs,
        None => {
            log::warn!("savePreferences expects {{destination, flights, flags}}");
            return;
        }
    };
    with_app(|app| {
        app.store().save_all(&prefs);
        app.update_ui();
    });
}

#[wasm_bindgen(js_name = toggleFlightPreference)]
pub fn toggle_flight_preference(id: &str) -> bool {
    with_app(|app| {
        let preferred = app.store().toggle_flight(id);
        app.update_ui();
        preferred
    })
    .unwrap_or(false)
}

#[wasm_bindgen(js_name = setDestinationPreference)]
pub fn set_destination_preference(code: &str) -> Option<String> {
    with_app(|app| {
        let destination = app.store().set_destination(code);
        app.update_ui();
        destination
    })
    .flatten()
}

#[wasm_bindgen(js_name = clearAllPrefs)]
pub fn clear_all_prefs() {
    with_app(App::clear_all);
}

#[wasm_bindgen(js_name = updateUI)]
pub fn update_ui() {
    with_app(App::update_ui);
}
