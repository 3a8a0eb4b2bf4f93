use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};
use yew::AppHandle;

use crate::components::summary_panel::{SummaryPanel, SummaryPanelProps};
use crate::config::Config;
use crate::filter::{is_visible, AirportFilter, FilterState, FlightCard, FILTER_PREFERRED};
use crate::models::{Binding, PreferenceSet};
use crate::render::{render, ButtonSpec};
use crate::services::preferences::PreferenceStore;
use crate::services::storage::StorageBackend;
use crate::summary::Summary;

const ATTR_PREF: &str = "data-pref";
const ATTR_FLIGHT: &str = "data-flight";
const ATTR_DESTINATION: &str = "data-destination";
const ATTR_AIRPORT: &str = "data-airport";
const ATTR_PREFERRED: &str = "data-preferred";
const ATTR_CUSTOM_HANDLER: &str = "data-custom-handler";
const ATTR_LABEL_ACTIVE: &str = "data-label-active";
const ATTR_LABEL_INACTIVE: &str = "data-label-inactive";

pub type Store = PreferenceStore<Box<dyn StorageBackend>>;

/// Binds page markup to the preference store and keeps it in sync.
pub struct App {
    store: Store,
    config: Config,
    filter: RefCell<FilterState>,
    summary: RefCell<Option<AppHandle<SummaryPanel>>>,
}

impl App {
    pub fn new(store: Store, config: Config) -> Rc<Self> {
        Rc::new(Self {
            store,
            config,
            filter: RefCell::new(FilterState::default()),
            summary: RefCell::new(None),
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Runs `bind` once the document is parsed.
    pub fn start(self: &Rc<Self>) -> Result<()> {
        let document = document()?;
        if document.ready_state() != "loading" {
            return self.bind();
        }

        let app = Rc::clone(self);
        let on_ready = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Err(e) = app.bind() {
                log::warn!("Could not bind preference controls: {:#}", e);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("addEventListener failed: {:?}", e))?;
        on_ready.forget();
        Ok(())
    }

    /// Attaches click handlers to every marked element, then renders.
    pub fn bind(self: &Rc<Self>) -> Result<()> {
        let document = document()?;

        let mut bound = 0;
        for el in query_all(&document, &self.config.button_selector)? {
            let binding = match read_binding(&el) {
                Some(binding) => binding,
                None => continue,
            };
            if el.has_attribute(ATTR_CUSTOM_HANDLER) {
                continue;
            }
            let app = Rc::clone(self);
            on_click(&el, move |_| {
                app.store.toggle_binding(&binding);
                app.update_ui();
            })?;
            bound += 1;
        }

        for el in query_all(&document, &self.config.airport_filter_selector)? {
            let value = el.get_attribute(ATTR_AIRPORT).unwrap_or_default();
            let app = Rc::clone(self);
            on_click(&el, move |_| {
                app.filter.borrow_mut().airport = AirportFilter::parse(&value);
                app.update_ui();
            })?;
        }

        for el in query_all(&document, &self.config.preferred_filter_selector)? {
            let value = el.get_attribute(ATTR_PREFERRED).unwrap_or_default();
            let app = Rc::clone(self);
            on_click(&el, move |_| {
                app.filter.borrow_mut().set_preferred(&value);
                app.update_ui();
            })?;
        }

        for el in query_all(&document, &self.config.clear_selector)? {
            let app = Rc::clone(self);
            on_click(&el, move |_| app.clear_all())?;
        }

        log::debug!("bound {} preference buttons", bound);
        self.update_ui();
        Ok(())
    }

    /// Re-renders everything from a fresh store snapshot.
    pub fn update_ui(&self) {
        if let Err(e) = self.try_update_ui() {
            log::warn!("Could not update preference view: {:#}", e);
        }
    }

    fn try_update_ui(&self) -> Result<()> {
        let document = document()?;
        let prefs = self.store.get_all();

        self.apply_buttons(&document, &prefs)?;
        self.mount_summary(&document, &prefs);
        self.apply_filters(&document, &prefs)?;
        Ok(())
    }

    fn apply_buttons(&self, document: &Document, prefs: &PreferenceSet) -> Result<()> {
        let mut elements = Vec::new();
        let mut specs = Vec::new();
        for el in query_all(document, &self.config.button_selector)? {
            if let Some(binding) = read_binding(&el) {
                specs.push(ButtonSpec {
                    binding,
                    label_active: el.get_attribute(ATTR_LABEL_ACTIVE),
                    label_inactive: el.get_attribute(ATTR_LABEL_INACTIVE),
                    has_card: closest(&el, &self.config.card_selector).is_some(),
                });
                elements.push(el);
            }
        }

        for patch in render(prefs, &specs) {
            let el = &elements[patch.index];
            toggle_class(el, &self.config.active_class, patch.active)?;
            if let Some(selected) = patch.card_selected {
                if let Some(card) = closest(el, &self.config.card_selector) {
                    toggle_class(&card, &self.config.selected_class, selected)?;
                }
            }
            if let Some(label) = patch.label {
                el.set_text_content(Some(&label));
            }
        }
        Ok(())
    }

    fn mount_summary(&self, document: &Document, prefs: &PreferenceSet) {
        let root = match document.get_element_by_id(&self.config.summary_id) {
            Some(root) => root,
            None => return,
        };
        let props = SummaryPanelProps {
            summary: Summary::build(prefs, &self.config.labels),
        };

        let mut slot = self.summary.borrow_mut();
        if let Some(previous) = slot.take() {
            previous.destroy();
        }
        *slot = Some(yew::Renderer::<SummaryPanel>::with_root_and_props(root, props).render());
    }

    fn apply_filters(&self, document: &Document, prefs: &PreferenceSet) -> Result<()> {
        let filter = self.filter.borrow().clone();

        for el in query_all(document, &self.config.flight_card_selector)? {
            let card = FlightCard {
                airport: el.get_attribute(ATTR_AIRPORT),
                flight: el.get_attribute(ATTR_FLIGHT).or_else(|| {
                    el.query_selector("[data-flight]")
                        .ok()
                        .flatten()
                        .and_then(|inner| inner.get_attribute(ATTR_FLIGHT))
                }),
            };
            toggle_class(&el, &self.config.hidden_class, !is_visible(&card, &filter, prefs))?;
        }

        for el in query_all(document, &self.config.airport_filter_selector)? {
            let value = el.get_attribute(ATTR_AIRPORT).unwrap_or_default();
            toggle_class(&el, &self.config.active_class, AirportFilter::parse(&value) == filter.airport)?;
        }

        for el in query_all(document, &self.config.preferred_filter_selector)? {
            let value = el.get_attribute(ATTR_PREFERRED).unwrap_or_default();
            let wants_preferred = value.eq_ignore_ascii_case(FILTER_PREFERRED);
            toggle_class(&el, &self.config.active_class, wants_preferred == filter.preferred_only)?;
        }
        Ok(())
    }

    /// Asks the user first; clears and re-renders only on confirm.
    pub fn clear_all(&self) {
        self.clear_all_with(|message| {
            web_sys::window()
                .and_then(|w| w.confirm_with_message(message).ok())
                .unwrap_or(false)
        });
    }

    fn clear_all_with(&self, confirm: impl FnOnce(&str) -> bool) {
        if self.store.clear_all(confirm) {
            self.update_ui();
        }
    }
}

fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| anyhow!("no document"))
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| anyhow!("bad selector {:?}: {:?}", selector, e))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

fn toggle_class(el: &Element, class: &str, on: bool) -> Result<()> {
    el.class_list()
        .toggle_with_force(class, on)
        .map(|_| ())
        .map_err(|e| anyhow!("classList.toggle({}) failed: {:?}", class, e))
}

fn read_binding(el: &Element) -> Option<Binding> {
    if let Some(key) = el.get_attribute(ATTR_PREF) {
        return Some(Binding::Flag(key));
    }
    if let Some(id) = el.get_attribute(ATTR_FLIGHT) {
        return Some(Binding::Flight(id));
    }
    el.get_attribute(ATTR_DESTINATION).map(Binding::Destination)
}

fn on_click(el: &Element, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    el.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("addEventListener failed: {:?}", e))?;
    callback.forget();
    Ok(())
}
