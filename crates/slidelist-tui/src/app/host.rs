//! Bridge between gesture controllers and the application loop.

use compact_str::CompactString;
use slidelist_core::SlideState;
use slidelist_gesture::{ReorderHost, SlideStore};
use tokio::sync::mpsc;

/// Lifecycle events forwarded from controller tasks to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Started { origin: usize },
    Stopped { from: usize, to: usize },
}

/// The list side of every item's gesture controller.
///
/// Slide states go straight into the shared store; drag lifecycle events are
/// queued for the app loop, which owns the item list.
pub struct ListHost {
    slides: SlideStore<CompactString>,
    events: mpsc::UnboundedSender<HostEvent>,
}

impl ListHost {
    pub fn new(
        slides: SlideStore<CompactString>,
    ) -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { slides, events }, rx)
    }

    fn forward(&self, event: HostEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!(?event, "App loop gone, dropping host event");
        }
    }
}

impl ReorderHost<CompactString> for ListHost {
    fn update_slide_state(&self, item: &CompactString, state: SlideState) {
        self.slides.set(item, state);
    }

    fn on_start_drag(&self, origin_index: usize) {
        self.forward(HostEvent::Started {
            origin: origin_index,
        });
    }

    fn on_stop_drag(&self, origin_index: usize, destination_index: usize) {
        self.forward(HostEvent::Stopped {
            from: origin_index,
            to: destination_index,
        });
    }
}
