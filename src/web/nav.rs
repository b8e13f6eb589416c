use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use super::{DomElement, by_id, document, listen, query, query_all};
use crate::SiteError;
use crate::config::NavConfig;
use crate::nav::{MobileMenu, ScrollMetrics, ScrollTracker, toggle_abstract};
use crate::surface::Element;

pub(crate) fn start(win: &Window, doc: &Document, config: &NavConfig) -> Result<(), SiteError> {
    let links = query_all(doc, ".nav-link");
    start_mobile_menu(doc, &links)?;

    let back_to_top = by_id(doc, "back-to-top");
    if let Some(button) = &back_to_top {
        let win_click = win.clone();
        listen(&button.0, "click", move |_evt| {
            let opts = ScrollToOptions::new();
            opts.set_top(0.0);
            opts.set_behavior(ScrollBehavior::Smooth);
            win_click.scroll_to_with_scroll_to_options(&opts);
        })?;
    }

    let tracker = ScrollTracker::new(config.clone());
    let progress = by_id(doc, "scroll-progress");
    let sections = query_all(doc, "section[id]");
    let win_scroll = win.clone();
    let doc_scroll = doc.clone();
    listen(win, "scroll", move |_evt| {
        let metrics = scroll_metrics(&win_scroll, &doc_scroll);
        if let Some(bar) = &progress {
            tracker.update_progress(metrics, bar);
        }
        if let Some(button) = &back_to_top {
            tracker.update_back_to_top(metrics, button);
        }
        let section_refs: Vec<&dyn Element> = sections.iter().map(|s| s as &dyn Element).collect();
        let link_refs: Vec<&dyn Element> = links.iter().map(|l| l as &dyn Element).collect();
        tracker.update_nav_links(metrics.scroll_y, &section_refs, &link_refs);
    })?;
    Ok(())
}

fn scroll_metrics(win: &Window, doc: &Document) -> ScrollMetrics {
    ScrollMetrics {
        scroll_y: win.scroll_y().unwrap_or(0.0),
        scroll_height: doc
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0),
        viewport_height: super::viewport_size(win).1,
    }
}

fn start_mobile_menu(doc: &Document, links: &[DomElement]) -> Result<(), SiteError> {
    let (Some(toggle), Some(nav)) = (query(doc, ".mobile-menu-toggle"), query(doc, "nav")) else {
        return Ok(());
    };
    let icon = toggle
        .0
        .query_selector("i")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(DomElement);
    let parts = Rc::new((nav, icon));

    {
        let parts = parts.clone();
        listen(&toggle.0, "click", move |_evt| {
            menu(&parts).toggle();
        })?;
    }
    for link in links {
        let parts = parts.clone();
        listen(&link.0, "click", move |_evt| menu(&parts).close())?;
    }
    Ok(())
}

fn menu(parts: &(DomElement, Option<DomElement>)) -> MobileMenu<'_> {
    MobileMenu {
        nav: &parts.0,
        icon: parts.1.as_ref().map(|i| i as &dyn Element),
    }
}

/// Backs the `toggleAbstract` export: flip the abstract with id `id` and
/// relabel `button` when given.
pub(crate) fn toggle_abstract_by_id(id: &str, button: Option<HtmlElement>) -> Result<bool, SiteError> {
    let doc = document()?;
    let abstract_el = by_id(&doc, id).ok_or_else(|| SiteError::MissingElement(format!("#{id}")))?;
    let button = button.map(DomElement);
    Ok(toggle_abstract(&abstract_el, button.as_ref().map(|b| b as &dyn Element)))
}
