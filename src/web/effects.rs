//! Observer- and timer-driven effects: scroll reveals, stat counters, skill
//! bars and the typing tagline.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::{DomElement, query, query_all, set_timeout, window};
use crate::SiteError;
use crate::config::{RevealConfig, TypingConfig};
use crate::reveal::{
    CounterAnimation, RevealGate, RevealPolicy, SkillBarBinding, format_count, parse_target,
    reveal, run_counter,
};
use crate::surface::Element;
use crate::typing::TypingEffect;

/// Observe `targets`, calling `on_fire(index)` whenever the gate lets an
/// intersection through. One-shot gates unobserve their target after firing.
fn observe(
    targets: &[DomElement],
    threshold: f64,
    policy: RevealPolicy,
    mut on_fire: impl FnMut(usize) + 'static,
) -> Result<IntersectionObserver, SiteError> {
    let keys: Vec<web_sys::Element> = targets.iter().map(|t| t.0.clone().into()).collect();
    let lookup = keys.clone();
    let mut gate = RevealGate::new(policy);
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
            let target = entry.target();
            let Some(key) = lookup.iter().position(|k| *k == target) else { continue };
            let decision = gate.observe(key, entry.is_intersecting());
            if decision.fire {
                on_fire(key);
            }
            if decision.unobserve {
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    callback.forget();
    for key in &keys {
        observer.observe(key);
    }
    Ok(observer)
}

// --- Scroll reveal -------------------------------------------------------------

pub(crate) fn start_scroll_reveal(doc: &Document, config: &RevealConfig) -> Result<(), SiteError> {
    let targets = query_all(doc, ".reveal-on-scroll");
    if targets.is_empty() {
        return Ok(());
    }
    let revealed = targets.clone();
    observe(&targets, config.scroll_threshold, RevealPolicy::KeepObserving, move |i| {
        reveal(&revealed[i]);
    })?;
    Ok(())
}

// --- Stat counters ---------------------------------------------------------------

pub(crate) fn start_counters(doc: &Document, config: &RevealConfig) -> Result<(), SiteError> {
    let Some(section) = query(doc, ".stats-grid") else {
        log::debug!("no .stats-grid; counters disabled");
        return Ok(());
    };
    let counters = query_all(doc, ".stat-number");
    let (duration, step) = (config.counter_duration_ms, config.counter_step_ms);
    observe(&[section], config.counter_threshold, RevealPolicy::Once, move |_| {
        for el in &counters {
            let target = parse_target(el.attribute("data-target").as_deref());
            start_counter(el.clone(), CounterAnimation::new(target, duration, step), step);
        }
    })?;
    Ok(())
}

fn start_counter(el: DomElement, counter: CounterAnimation, step_ms: u32) {
    let counter = Rc::new(RefCell::new(counter));
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_counter = counter.clone();
    let tick_el = el.clone();
    let tick_handle = handle.clone();
    let tick = Closure::wrap(Box::new(move || {
        let t = tick_counter.borrow_mut().tick();
        tick_el.set_text(&format_count(t.display));
        if t.done {
            if let (Some(id), Some(w)) = (tick_handle.get(), web_sys::window()) {
                w.clear_interval_with_handle(id);
            }
        }
    }) as Box<dyn FnMut()>);

    let scheduled = window().and_then(|w| {
        w.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            step_ms as i32,
        )
        .map_err(SiteError::from)
    });
    match scheduled {
        Ok(id) => {
            handle.set(Some(id));
            tick.forget();
        }
        Err(e) => {
            log::warn!("counter interval unavailable, jumping to target: {e}");
            run_counter(&mut counter.borrow_mut(), &el);
        }
    }
}

// --- Skill bars --------------------------------------------------------------------

pub(crate) fn start_skill_bars(doc: &Document, config: &RevealConfig) -> Result<(), SiteError> {
    for bar in query_all(doc, ".progress") {
        let binding = SkillBarBinding::capture(&bar);
        let delay = config.skill_delay_ms;
        let animated = bar.clone();
        observe(&[bar], config.skill_threshold, RevealPolicy::Once, move |_| {
            let bar = animated.clone();
            let binding = binding.clone();
            if let Err(e) = set_timeout(delay, move || binding.animate(&bar)) {
                log::warn!("skill bar timer failed: {e}");
            }
        })?;
    }
    Ok(())
}

// --- Typing tagline ----------------------------------------------------------------

pub(crate) fn start_typing(doc: &Document, config: &TypingConfig) -> Result<(), SiteError> {
    let Some(el) = query(doc, ".typing-text") else {
        return Ok(());
    };
    let Some(effect) = TypingEffect::new(config) else {
        log::warn!("typing tagline has no words; skipped");
        return Ok(());
    };
    let delay = effect.start_delay_ms();
    schedule_typing(effect, el, delay);
    Ok(())
}

fn schedule_typing(mut effect: TypingEffect, el: DomElement, delay_ms: u32) {
    let result = set_timeout(delay_ms, move || {
        let frame = effect.tick();
        el.set_text(&frame.text);
        schedule_typing(effect, el, frame.next_delay_ms);
    });
    if let Err(e) = result {
        log::warn!("typing tagline stopped: {e}");
    }
}
