//! Scroll-driven page chrome: progress bar, back-to-top button, active
//! navigation link, the mobile menu and publication abstract toggles.

use crate::config::NavConfig;
use crate::surface::Element;

pub const ACTIVE_CLASS: &str = "active";
pub const VISIBLE_CLASS: &str = "visible";
pub const MENU_ICON_CLOSED: &str = "bi-list";
pub const MENU_ICON_OPEN: &str = "bi-x-lg";

/// Scroll geometry sampled on each scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// How far down the page we are, as a percentage in `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        let scrollable = self.scroll_height - self.viewport_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
    }
}

pub struct ScrollTracker {
    config: NavConfig,
}

impl ScrollTracker {
    pub fn new(config: NavConfig) -> Self {
        Self { config }
    }

    pub fn update_progress(&self, metrics: ScrollMetrics, bar: &dyn Element) {
        bar.set_style("width", &format!("{}%", metrics.progress_percent()));
    }

    pub fn update_back_to_top(&self, metrics: ScrollMetrics, button: &dyn Element) {
        if metrics.scroll_y > self.config.back_to_top_after {
            button.add_class(VISIBLE_CLASS);
        } else {
            button.remove_class(VISIBLE_CLASS);
        }
    }

    /// Id of the section under the scroll position. Later sections win when
    /// ranges overlap.
    pub fn current_section(&self, scroll_y: f64, sections: &[&dyn Element]) -> Option<String> {
        let mut current = None;
        for section in sections {
            let top = section.offset_top() - self.config.section_offset;
            if scroll_y >= top && scroll_y < top + section.offset_height() {
                current = section.attribute("id");
            }
        }
        current
    }

    /// Mark the link pointing at the current section active, clear the rest.
    pub fn update_nav_links(&self, scroll_y: f64, sections: &[&dyn Element], links: &[&dyn Element]) {
        let href = self
            .current_section(scroll_y, sections)
            .map(|id| format!("#{id}"))
            .unwrap_or_default();
        for link in links {
            link.remove_class(ACTIVE_CLASS);
            if link.attribute("href").as_deref() == Some(href.as_str()) {
                link.add_class(ACTIVE_CLASS);
            }
        }
    }
}

/// Hamburger toggle for the collapsed navigation.
pub struct MobileMenu<'a> {
    pub nav: &'a dyn Element,
    pub icon: Option<&'a dyn Element>,
}

impl MobileMenu<'_> {
    /// Open or close the menu, returning whether it is now open.
    pub fn toggle(&self) -> bool {
        let open = self.nav.toggle_class(ACTIVE_CLASS);
        self.set_icon(open);
        open
    }

    pub fn close(&self) {
        self.nav.remove_class(ACTIVE_CLASS);
        self.set_icon(false);
    }

    fn set_icon(&self, open: bool) {
        let Some(icon) = self.icon else { return };
        let (from, to) = if open {
            (MENU_ICON_CLOSED, MENU_ICON_OPEN)
        } else {
            (MENU_ICON_OPEN, MENU_ICON_CLOSED)
        };
        icon.remove_class(from);
        icon.add_class(to);
    }
}

pub const SHOW_ABSTRACT_LABEL: &str = "Show Abstract";
pub const HIDE_ABSTRACT_LABEL: &str = "Hide Abstract";

/// Expand or collapse a publication abstract and relabel its button.
/// Returns whether the abstract is now shown.
pub fn toggle_abstract(abstract_el: &dyn Element, button: Option<&dyn Element>) -> bool {
    let display = abstract_el.style("display");
    let show = display.is_empty() || display == "none";
    abstract_el.set_style("display", if show { "block" } else { "none" });
    if let Some(button) = button {
        button.set_text(if show { HIDE_ABSTRACT_LABEL } else { SHOW_ABSTRACT_LABEL });
    }
    show
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    fn metrics(scroll_y: f64) -> ScrollMetrics {
        ScrollMetrics { scroll_y, scroll_height: 3000.0, viewport_height: 1000.0 }
    }

    #[test]
    fn progress_is_a_clamped_percentage() {
        assert_eq!(metrics(0.0).progress_percent(), 0.0);
        assert_eq!(metrics(1000.0).progress_percent(), 50.0);
        assert_eq!(metrics(2500.0).progress_percent(), 100.0);
        let short = ScrollMetrics { scroll_y: 0.0, scroll_height: 800.0, viewport_height: 1000.0 };
        assert_eq!(short.progress_percent(), 0.0);

        let bar = FakeElement::default();
        ScrollTracker::new(NavConfig::default()).update_progress(metrics(500.0), &bar);
        assert_eq!(bar.style("width"), "25%");
    }

    #[test]
    fn back_to_top_shows_past_threshold() {
        let tracker = ScrollTracker::new(NavConfig::default());
        let button = FakeElement::default();
        tracker.update_back_to_top(metrics(501.0), &button);
        assert!(button.has_class(VISIBLE_CLASS));
        tracker.update_back_to_top(metrics(500.0), &button);
        assert!(!button.has_class(VISIBLE_CLASS));
    }

    #[test]
    fn active_link_follows_section_under_scroll() {
        let tracker = ScrollTracker::new(NavConfig::default());
        let about = FakeElement::section("about", 0.0, 800.0);
        let work = FakeElement::section("work", 800.0, 900.0);
        let sections: [&dyn Element; 2] = [&about, &work];
        let about_link = FakeElement::with_attr("href", "#about");
        let work_link = FakeElement::with_attr("href", "#work");
        let links: [&dyn Element; 2] = [&about_link, &work_link];

        tracker.update_nav_links(100.0, &sections, &links);
        assert!(about_link.has_class(ACTIVE_CLASS));
        assert!(!work_link.has_class(ACTIVE_CLASS));

        // about spans -150..650 exclusive, so 650 already belongs to work
        tracker.update_nav_links(650.0, &sections, &links);
        assert!(!about_link.has_class(ACTIVE_CLASS));
        assert!(work_link.has_class(ACTIVE_CLASS));

        tracker.update_nav_links(10_000.0, &sections, &links);
        assert!(!about_link.has_class(ACTIVE_CLASS) && !work_link.has_class(ACTIVE_CLASS));
    }

    #[test]
    fn overlapping_sections_prefer_the_later_one() {
        let tracker = ScrollTracker::new(NavConfig::default());
        let a = FakeElement::section("a", 0.0, 1000.0);
        let b = FakeElement::section("b", 200.0, 1000.0);
        let sections: [&dyn Element; 2] = [&a, &b];
        assert_eq!(tracker.current_section(300.0, &sections).as_deref(), Some("b"));
    }

    #[test]
    fn menu_toggle_swaps_icon() {
        let nav = FakeElement::default();
        let icon = FakeElement::default();
        icon.add_class(MENU_ICON_CLOSED);
        let menu = MobileMenu { nav: &nav, icon: Some(&icon) };

        assert!(menu.toggle());
        assert!(nav.has_class(ACTIVE_CLASS));
        assert!(icon.has_class(MENU_ICON_OPEN) && !icon.has_class(MENU_ICON_CLOSED));

        menu.close();
        assert!(!nav.has_class(ACTIVE_CLASS));
        assert!(icon.has_class(MENU_ICON_CLOSED) && !icon.has_class(MENU_ICON_OPEN));
    }

    #[test]
    fn abstract_toggle_alternates() {
        let abs = FakeElement::default();
        let button = FakeElement::default();
        assert!(toggle_abstract(&abs, Some(&button)));
        assert_eq!(abs.style("display"), "block");
        assert_eq!(button.text(), HIDE_ABSTRACT_LABEL);
        assert!(!toggle_abstract(&abs, Some(&button)));
        assert_eq!(abs.style("display"), "none");
        assert_eq!(button.text(), SHOW_ABSTRACT_LABEL);
        assert!(toggle_abstract(&abs, None));
    }
}
