//! "Observe until visible, then animate" effects: scroll reveals, stat
//! counters and skill bars.
//!
//! Each one is driven by an intersection observer in `crate::web::effects`;
//! the logic here decides what fires and when observation stops.

use std::collections::HashSet;

use crate::surface::Element;

pub const VISIBLE_CLASS: &str = "visible";
pub const SKILL_ANIMATE_CLASS: &str = "animate";
pub const TARGET_WIDTH_PROPERTY: &str = "--target-width";

/// What happens to an observation after its first hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealPolicy {
    /// Fire on every intersection and never unsubscribe (class adds are
    /// idempotent, so repeat hits are harmless).
    KeepObserving,
    /// Fire on the first intersection only, then unsubscribe.
    Once,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealDecision {
    pub fire: bool,
    pub unobserve: bool,
}

/// Tracks which observed targets already fired.
#[derive(Debug)]
pub struct RevealGate {
    policy: RevealPolicy,
    fired: HashSet<usize>,
}

impl RevealGate {
    pub fn new(policy: RevealPolicy) -> Self {
        Self { policy, fired: HashSet::new() }
    }

    /// Feed one intersection report for target `key`.
    pub fn observe(&mut self, key: usize, intersecting: bool) -> RevealDecision {
        if !intersecting {
            return RevealDecision::default();
        }
        match self.policy {
            RevealPolicy::KeepObserving => {
                self.fired.insert(key);
                RevealDecision { fire: true, unobserve: false }
            }
            RevealPolicy::Once => {
                let first = self.fired.insert(key);
                RevealDecision { fire: first, unobserve: first }
            }
        }
    }

    pub fn has_fired(&self, key: usize) -> bool {
        self.fired.contains(&key)
    }
}

/// Scroll-reveal side effect.
pub fn reveal(el: &dyn Element) {
    el.add_class(VISIBLE_CLASS);
}

/// Read a counter's `data-target`. Missing or non-numeric values count as 0.
pub fn parse_target(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Integers render without a fractional part; anything else as-is.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterTick {
    pub display: f64,
    pub done: bool,
}

/// Counts a display up from 0 to `target` in fixed-size increments.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: f64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterAnimation {
    pub fn new(target: f64, duration_ms: u32, step_ms: u32) -> Self {
        let steps = (duration_ms as f64 / step_ms.max(1) as f64).max(1.0);
        Self {
            target,
            increment: target / steps,
            current: 0.0,
            done: false,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// One interval tick. Once the running value reaches the target the
    /// display snaps to exactly `target` and the animation is finished.
    pub fn tick(&mut self) -> CounterTick {
        if self.done {
            return CounterTick { display: self.target, done: true };
        }
        self.current += self.increment;
        if self.current >= self.target {
            self.done = true;
            CounterTick { display: self.target, done: true }
        } else {
            CounterTick { display: self.current.floor(), done: false }
        }
    }
}

/// Run a counter to completion synchronously, writing every tick. Returns the
/// number of ticks taken. Used where no timer is available.
pub fn run_counter(counter: &mut CounterAnimation, el: &dyn Element) -> usize {
    let mut ticks = 0;
    loop {
        let tick = counter.tick();
        ticks += 1;
        el.set_text(&format_count(tick.display));
        if tick.done {
            return ticks;
        }
    }
}

/// A skill bar whose inline width has been parked in a custom property so a
/// CSS transition can grow it once the bar scrolls into view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillBarBinding {
    pub target_width: String,
}

impl SkillBarBinding {
    /// Capture the bar's intended width and collapse it to zero.
    pub fn capture(el: &dyn Element) -> Self {
        let target_width = el.style("width");
        el.set_style(TARGET_WIDTH_PROPERTY, &target_width);
        el.set_style("width", "0");
        Self { target_width }
    }

    pub fn animate(&self, el: &dyn Element) {
        el.add_class(SKILL_ANIMATE_CLASS);
    }
}
