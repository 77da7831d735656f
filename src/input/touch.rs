// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Touch gesture classification.
//!
//! [`TouchGestureController`] tracks a single-finger touch session and, when
//! the finger lifts, classifies it as either a tap (routed to the first
//! registered per-element-class handler that matches) or a directional swipe
//! emitted as a `swipe` event. Multi-finger sessions are abandoned silently;
//! multi-touch gestures are unsupported.
//!
//! The swipe angle is measured in screen coordinates with the y axis
//! flipped, and the angle-to-direction bucketing is carried over from the
//! original client unchanged: a gesture toward positive x lands in the LEFT
//! bucket and toward negative x in the RIGHT bucket. Call sites compensate
//! for this, so it must not be "corrected" here.

use anyhow::Result;

use crate::bus::EventBus;
use crate::input::ButtonCode;

pub(crate) const TOUCH: &str = "touch";
pub(crate) const SWIPE: &str = "swipe";

/// Minimum Euclidean travel, in display units, for a session to classify as
/// a swipe rather than a tap.
pub(crate) const MIN_SWIPE_DISTANCE: f64 = 70.0;

/// One contact point reported by a raw touch signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TouchContact {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

/// Payload of the `touch` and `swipe` events.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TouchPayload {
    /// A tap at the given position on an element with the given classes.
    Tap { x: f64, y: f64, classes: Vec<String> },
    /// A swipe, carrying its bucketed direction as a reused directional
    /// button code.
    Swipe(ButtonCode),
}

struct TouchSession {
    start: TouchContact,
    current: TouchContact,
    classes: Vec<String>,
}

pub(crate) struct TouchGestureController {
    bus: EventBus<TouchPayload>,
    session: Option<TouchSession>,
    handlers: Vec<(String, Box<dyn FnMut(&TouchPayload)>)>,
}

impl TouchGestureController {
    pub(crate) fn new() -> Self {
        Self {
            bus: EventBus::with_vocabulary(&[TOUCH, SWIPE]),
            session: None,
            handlers: Vec::new(),
        }
    }

    /// The controller's event bus, for subscribing to `touch` and `swipe`.
    pub(crate) fn events(&mut self) -> &mut EventBus<TouchPayload> {
        &mut self.bus
    }

    /// Registers a tap handler for elements carrying `class`.
    ///
    /// When a tap is classified, the registered handlers are walked in
    /// registration order and the first whose class appears on the touched
    /// element is invoked; later matches are skipped.
    pub(crate) fn register_touch_handler(
        &mut self,
        class: &str,
        handler: Box<dyn FnMut(&TouchPayload)>,
    ) {
        self.handlers.push((class.to_string(), handler));
    }

    /// Starts a touch session for the element whose class list is `classes`.
    ///
    /// Reporting more than one contact abandons the session.
    pub(crate) fn touch_begin(&mut self, contacts: &[TouchContact], classes: &[String]) {
        let [contact] = contacts else {
            self.session = None;
            return;
        };

        self.session = Some(TouchSession {
            start: *contact,
            current: *contact,
            classes: classes.to_vec(),
        });
    }

    /// Updates the tracked contact position.
    pub(crate) fn touch_move(&mut self, contacts: &[TouchContact]) {
        let [contact] = contacts else {
            self.session = None;
            return;
        };

        if let Some(session) = &mut self.session {
            session.current = *contact;
        }
    }

    /// Ends the session and classifies it as a tap or a swipe.
    pub(crate) fn touch_end(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        let dx = session.current.x - session.start.x;
        let dy = session.current.y - session.start.y;

        if dx.hypot(dy) < MIN_SWIPE_DISTANCE {
            let tap = TouchPayload::Tap {
                x: session.current.x,
                y: session.current.y,
                classes: session.classes,
            };
            self.bus.trigger(TOUCH, &tap)?;
            self.dispatch_tap(&tap);
            return Ok(());
        }

        // Screen coordinates: y grows downward, so the vertical delta is
        // flipped before taking the angle.
        let mut angle = (-dy).atan2(dx).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }

        let direction = Self::direction_for_angle(angle);
        self.bus.trigger(SWIPE, &TouchPayload::Swipe(direction))?;

        Ok(())
    }

    // Bucketing carried over verbatim from the original client; see the
    // module docs for the left/right quirk.
    fn direction_for_angle(angle: f64) -> ButtonCode {
        if (0.0..=45.0).contains(&angle) || angle >= 315.0 {
            ButtonCode::Left
        } else if (135.0..=225.0).contains(&angle) {
            ButtonCode::Right
        } else if angle > 45.0 && angle < 135.0 {
            ButtonCode::Down
        } else {
            ButtonCode::Up
        }
    }

    fn dispatch_tap(&mut self, tap: &TouchPayload) {
        let TouchPayload::Tap { classes, .. } = tap else {
            return;
        };

        for (class, handler) in &mut self.handlers {
            if classes.contains(class) {
                handler(tap);
                return;
            }
        }
    }
}
