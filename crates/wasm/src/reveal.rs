//! Scroll-triggered reveal for page sections.
//!
//! Independent of the particle animation. Matching elements get a hidden
//! class up front and a visible class the first time at least 10% of them
//! enters the viewport. Project cards in a row of three get staggered
//! transition delays.

use flow_field_core::FlowError;
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

/// Elements that take part in the reveal.
pub const REVEAL_SELECTOR: &str = ".project-card, .section-title, .hero-content > *";
/// Class added to every revealable element before observation.
pub const HIDDEN_CLASS: &str = "reveal-up";
/// Class added once an element has intersected the viewport.
pub const VISIBLE_CLASS: &str = "active";
/// Elements with this class get a staggered transition delay.
pub const STAGGERED_CLASS: &str = "project-card";
/// Visible fraction that counts as intersecting.
pub const THRESHOLD: f64 = 0.1;
pub const ROOT_MARGIN: &str = "0px";
const STAGGER_COLUMNS: usize = 3;
const STAGGER_STEP_MS: usize = 100;

/// Transition delay for the element at `index` in document order:
/// 0, 100, 200, 0, 100, ... milliseconds.
pub fn transition_delay_ms(index: usize) -> usize {
    (index % STAGGER_COLUMNS) * STAGGER_STEP_MS
}

/// Marks every matching element hidden and reveals it on first intersection.
///
/// Returns the number of elements observed.
pub fn install(document: &Document) -> Result<usize, JsValue> {
    let on_intersect = Closure::wrap(Box::new(move |entries: Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                if let Err(e) = entry.target().class_list().add_1(VISIBLE_CLASS) {
                    log::warn!("reveal: could not add class: {e:?}");
                }
            }
        }
    }) as Box<dyn FnMut(Array)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(THRESHOLD));
    options.set_root_margin(ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
            .map_err(|_| {
                JsValue::from_str(
                    &FlowError::MissingHostCapability("IntersectionObserver".into()).to_string(),
                )
            })?;
    on_intersect.forget();

    let nodes = document.query_selector_all(REVEAL_SELECTOR)?;
    let mut observed = 0;
    for index in 0..nodes.length() {
        let Some(element) = nodes.get(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let classes = element.class_list();
        classes.add_1(HIDDEN_CLASS)?;
        if classes.contains(STAGGERED_CLASS) {
            if let Some(html) = element.dyn_ref::<HtmlElement>() {
                let delay = transition_delay_ms(index as usize);
                html.style()
                    .set_property("transition-delay", &format!("{delay}ms"))?;
            }
        }
        observer.observe(&element);
        observed += 1;
    }
    log::info!("reveal: observing {observed} elements");
    Ok(observed)
}
