//! Hero slider.
//!
//! A `.slider` holds a `.slides` track of `.slide` elements and optional
//! `[data-dir="prev"]` / `[data-dir="next"]` buttons. The visible slide is
//! selected by translating the track: slide `i` is `translateX(-i*100%)`.
//!
//! Autoplay advances every interval. Entering the slider cancels the timer;
//! leaving it starts a fresh one, so the next advance is a full interval away.
//! Manual prev/next do not touch the timer.

use crate::dom::{Document, NodeId};
use crate::events::{EventKind, Listeners};
use crate::scheduler::{Scheduler, TimerId};
use std::time::Duration;
use tracing::debug;

/// Cyclic position over a fixed, non-empty number of slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideIndex {
    index: usize,
    len: usize,
}

impl SlideIndex {
    /// `None` for zero slides: there is no valid index to hold.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    pub fn get(self) -> usize {
        self.index
    }

    pub fn count(self) -> usize {
        self.len
    }

    pub fn next(self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    pub fn prev(self) -> Self {
        Self {
            index: (self.index + self.len - 1) % self.len,
            ..self
        }
    }

    /// CSS transform showing this slide.
    pub fn transform(self) -> String {
        match self.index {
            0 => "translateX(0%)".to_string(),
            i => format!("translateX(-{}%)", i * 100),
        }
    }
}

#[derive(Debug)]
pub struct SliderController {
    root: NodeId,
    track: NodeId,
    prev_button: Option<NodeId>,
    next_button: Option<NodeId>,
    index: SlideIndex,
    interval: Duration,
    autoplay: Option<TimerId>,
}

impl SliderController {
    /// Returns `None` when the page has no slider, no track, or no slides.
    pub fn init(doc: &Document, interval: Duration) -> Option<Self> {
        let root = doc.first_with_class(doc.root(), "slider")?;
        let Some(track) = doc.first_with_class(root, "slides") else {
            debug!("slider has no .slides track, disabled");
            return None;
        };
        let Some(index) = SlideIndex::new(doc.all_with_class(root, "slide").len()) else {
            debug!("slider has no slides, disabled");
            return None;
        };
        Some(Self {
            root,
            track,
            prev_button: doc.first_with_attr(root, "data-dir", Some("prev")),
            next_button: doc.first_with_attr(root, "data-dir", Some("next")),
            index,
            interval,
            autoplay: None,
        })
    }

    pub fn bind<A: Clone>(&self, listeners: &mut Listeners<A>, actions: SliderActions<A>) {
        if let Some(next) = self.next_button {
            listeners.listen(next, EventKind::Click, actions.next);
        }
        if let Some(prev) = self.prev_button {
            listeners.listen(prev, EventKind::Click, actions.prev);
        }
        listeners.listen(self.root, EventKind::PointerEnter, actions.pause);
        listeners.listen(self.root, EventKind::PointerLeave, actions.resume);
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn prev_button(&self) -> Option<NodeId> {
        self.prev_button
    }

    pub fn next_button(&self) -> Option<NodeId> {
        self.next_button
    }

    pub fn index(&self) -> usize {
        self.index.get()
    }

    pub fn slide_count(&self) -> usize {
        self.index.count()
    }

    pub fn transform(&self) -> String {
        self.index.transform()
    }

    pub fn is_playing(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn next(&mut self, doc: &mut Document) {
        self.index = self.index.next();
        self.render(doc);
    }

    pub fn prev(&mut self, doc: &mut Document) {
        self.index = self.index.prev();
        self.render(doc);
    }

    /// Start autoplay, replacing any running timer.
    pub fn play<A: Clone>(&mut self, scheduler: &mut Scheduler<A>, tick: A) {
        self.pause(scheduler);
        self.autoplay = Some(scheduler.set_interval(self.interval, tick));
        debug!(interval_ms = self.interval.as_millis() as u64, "slider autoplay started");
    }

    pub fn pause<A: Clone>(&mut self, scheduler: &mut Scheduler<A>) {
        if let Some(timer) = self.autoplay.take() {
            scheduler.clear_interval(timer);
            debug!("slider autoplay paused");
        }
    }

    fn render(&self, doc: &mut Document) {
        doc.get_mut(self.track).set_attr(
            "style",
            &format!("transform: {}", self.index.transform()),
        );
    }
}

/// Actions a slider binds to its controls.
#[derive(Debug, Clone)]
pub struct SliderActions<A> {
    pub next: A,
    pub prev: A,
    pub pause: A,
    pub resume: A,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{self, PageKind, SiteOptions};

    fn slider(slides: usize) -> (Document, SliderController) {
        let doc = site::build(
            PageKind::Home,
            &SiteOptions {
                slides,
                ..SiteOptions::default()
            },
        );
        let controller = SliderController::init(&doc, Duration::from_secs(5)).unwrap();
        (doc, controller)
    }

    fn track_style(doc: &Document) -> String {
        let track = doc.first_with_class(doc.root(), "slides").unwrap();
        doc.get(track).attr("style").unwrap_or_default().to_string()
    }

    #[test]
    fn index_stays_in_range_for_any_walk() {
        for len in 1..=5 {
            let mut index = SlideIndex::new(len).unwrap();
            for step in 0..40 {
                index = if step % 3 == 0 { index.prev() } else { index.next() };
                assert!(index.get() < len);
            }
        }
    }

    #[test]
    fn next_then_prev_is_identity() {
        for len in 1..=4 {
            let mut index = SlideIndex::new(len).unwrap();
            for _ in 0..len {
                assert_eq!(index.next().prev(), index);
                assert_eq!(index.prev().next(), index);
                index = index.next();
            }
        }
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let index = SlideIndex::new(3).unwrap().prev();
        assert_eq!(index.get(), 2);
        assert_eq!(index.transform(), "translateX(-200%)");
    }

    #[test]
    fn zero_slides_has_no_index() {
        assert_eq!(SlideIndex::new(0), None);
    }

    #[test]
    fn transform_of_first_slide_is_zero() {
        assert_eq!(SlideIndex::new(2).unwrap().transform(), "translateX(0%)");
        assert_eq!(SlideIndex::new(2).unwrap().next().transform(), "translateX(-100%)");
    }

    #[test]
    fn next_moves_the_track() {
        let (mut doc, mut controller) = slider(3);
        controller.next(&mut doc);
        assert_eq!(controller.index(), 1);
        assert_eq!(track_style(&doc), "transform: translateX(-100%)");
        controller.next(&mut doc);
        controller.next(&mut doc);
        assert_eq!(controller.index(), 0);
        assert_eq!(track_style(&doc), "transform: translateX(0%)");
    }

    #[test]
    fn slider_without_slides_is_disabled() {
        let doc = site::build(
            PageKind::Home,
            &SiteOptions {
                slides: 0,
                ..SiteOptions::default()
            },
        );
        assert!(SliderController::init(&doc, Duration::from_secs(5)).is_none());
    }

    #[test]
    fn page_without_slider_is_disabled() {
        let doc = site::build(PageKind::Contact, &SiteOptions::default());
        assert!(SliderController::init(&doc, Duration::from_secs(5)).is_none());
    }

    #[test]
    fn replaying_does_not_stack_timers() {
        let (_, mut controller) = slider(3);
        let mut scheduler = Scheduler::new();
        controller.play(&mut scheduler, ());
        controller.play(&mut scheduler, ());
        assert_eq!(scheduler.active(), 1);
        controller.pause(&mut scheduler);
        assert_eq!(scheduler.active(), 0);
        assert!(!controller.is_playing());
    }
}
