//! Desktop shell UI composition and interaction surfaces.

mod taskbar;
mod toasts;
mod window;

use leptos::*;

use self::{taskbar::Taskbar, toasts::ToastStack, window::DesktopWindow};

use crate::{
    model::PointerPosition,
    runtime_context::{desktop_viewport_rect, DesktopCommand},
    shortcuts::{shortcut_for_key, KeyModifiers},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the desktop: window layer, taskbar and toasts.
///
/// Pointer move/up listeners are installed on the global `window` so a drag or resize still ends
/// when the pointer is released outside the desktop surface.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;

    let pointer_move_listener = window_event_listener(ev::pointermove, move |ev| {
        if runtime.interaction.with_untracked(|interaction| interaction.is_idle()) {
            return;
        }
        runtime.dispatch_command(DesktopCommand::PointerMove(pointer_from_pointer_event(&ev)));
    });
    let pointer_up_listener = window_event_listener(ev::pointerup, move |_| {
        if !runtime.interaction.with_untracked(|interaction| interaction.is_idle()) {
            runtime.dispatch_command(DesktopCommand::PointerUp);
        }
    });
    let pointer_cancel_listener = window_event_listener(ev::pointercancel, move |_| {
        if !runtime.interaction.with_untracked(|interaction| interaction.is_idle()) {
            runtime.dispatch_command(DesktopCommand::PointerUp);
        }
    });
    let shortcut_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.repeat() {
            return;
        }
        let modifiers = KeyModifiers {
            alt: ev.alt_key(),
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
        };
        if let Some(shortcut) = shortcut_for_key(&ev.key(), modifiers) {
            ev.prevent_default();
            runtime.dispatch_command(DesktopCommand::Shortcut(shortcut));
        }
    });
    let resize_listener = window_event_listener(ev::resize, move |_| {
        runtime.dispatch_command(DesktopCommand::SetViewport(desktop_viewport_rect(
            runtime.taskbar_height_px,
        )));
    });
    on_cleanup(move || {
        pointer_move_listener.remove();
        pointer_up_listener.remove();
        pointer_cancel_listener.remove();
        shortcut_listener.remove();
        resize_listener.remove();
    });

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            class:interacting=move || !runtime.interaction.with(|interaction| interaction.is_idle())
        >
            <div
                class="desktop-window-layer"
                style=move || format!("bottom:{}px;", runtime.taskbar_height_px)
            >
                <For
                    each=move || state.get().windows
                    key=|win| win.id.0
                    let:win
                >
                    <DesktopWindow window_id=win.id />
                </For>
            </div>
            <ToastStack />
            <Taskbar />
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Whether a pointer-down should start a drag or resize: primary mouse button or primary touch.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}
