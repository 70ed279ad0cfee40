// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the player.
//!
//! Routes native keyboard, mouse and window events to player messages and
//! provides the periodic ticks that drive polling and housekeeping.

use super::Message;
use crate::config::HOUSEKEEPING_INTERVAL_MS;
use crate::ui::shortcuts::{self, Dispatch};
use iced::{event, mouse, time, window, Subscription};
use std::time::Duration;

/// Creates the input subscription.
///
/// Keyboard shortcuts are routed only when `keyboard_enabled` is set. Key
/// presses already captured by a widget, such as a focused text input, never
/// reach the shortcut table.
pub fn create_event_subscription(keyboard_enabled: bool) -> Subscription<Message> {
    if keyboard_enabled {
        event::listen_with(|event, status, window_id| {
            if let event::Event::Keyboard(keyboard_event) = &event {
                return match shortcuts::dispatch_event(keyboard_event, status) {
                    Dispatch::Handled(command) => Some(Message::Shortcut {
                        window: window_id,
                        command,
                    }),
                    Dispatch::Ignored => None,
                };
            }
            route_pointer_and_window(&event, window_id)
        })
    } else {
        event::listen_with(|event, _status, window_id| route_pointer_and_window(&event, window_id))
    }
}

fn route_pointer_and_window(event: &event::Event, window_id: window::Id) -> Option<Message> {
    match event {
        event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::PointerMoved(*position))
        }
        event::Event::Mouse(mouse::Event::CursorLeft) => Some(Message::PointerLeft),
        event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::PointerReleased)
        }
        event::Event::Window(window::Event::Opened { .. } | window::Event::Focused) => {
            Some(Message::Attach(window_id))
        }
        event::Event::Window(window::Event::Resized(_)) => Some(Message::WindowResized(window_id)),
        _ => None,
    }
}

/// One poll per rendered frame, active only while the session polls.
pub fn create_frame_subscription(active: bool) -> Subscription<Message> {
    if active {
        window::frames().map(|_| Message::Frame)
    } else {
        Subscription::none()
    }
}

/// Periodic tick for inbox draining and controls auto-hide.
pub fn create_tick_subscription() -> Subscription<Message> {
    time::every(Duration::from_millis(HOUSEKEEPING_INTERVAL_MS)).map(Message::Tick)
}
