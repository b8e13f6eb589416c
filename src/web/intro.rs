use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Window};

use super::{BrowserSession, DomElement, WebAudioSynth, by_id, set_timeout};
use crate::SiteError;
use crate::config::IntroConfig;
use crate::intro::{IntroController, IntroElements};
use crate::surface::Element;

struct IntroPage {
    overlay: Option<DomElement>,
    wrapper: Option<DomElement>,
    body: Option<DomElement>,
}

impl IntroPage {
    fn elements(&self) -> IntroElements<'_> {
        IntroElements {
            overlay: as_dyn(&self.overlay),
            wrapper: as_dyn(&self.wrapper),
            body: as_dyn(&self.body),
        }
    }
}

fn as_dyn(el: &Option<DomElement>) -> Option<&dyn Element> {
    el.as_ref().map(|e| e as &dyn Element)
}

pub(crate) fn start(win: &Window, doc: &Document, config: &IntroConfig) -> Result<(), SiteError> {
    let page = Rc::new(IntroPage {
        overlay: by_id(doc, "intro-overlay"),
        wrapper: by_id(doc, "wrapper"),
        body: doc.body().map(DomElement),
    });
    let mut store = BrowserSession::open(win);
    let mut controller = IntroController::new(config.clone(), &store);
    let plan = controller.begin(&mut store, &WebAudioSynth);
    log::debug!("intro {:?}: {} steps", controller.phase(), plan.len());

    let controller = Rc::new(RefCell::new(controller));
    plan.dispatch(
        |step| {
            let controller = controller.clone();
            let page = page.clone();
            let action = step.action;
            set_timeout(step.at_ms, move || {
                controller.borrow_mut().apply(action, &page.elements());
            })
            .map(drop)
        },
        |action| controller.borrow_mut().apply(action, &page.elements()),
    );
    Ok(())
}
