use super::*;
use crate::{
    chrome::{focus_on_pointer_down, titlebar_toggle, WindowChrome},
    geometry::ResizeLimits,
    icons::{ShellGlyph, ShellIcon},
    model::WindowState,
    window_manager::WindowCommand,
};
use desktop_app_contract::AppMountContext;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[cfg(target_arch = "wasm32")]
fn try_release_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.release_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_release_pointer_capture(_: &web_sys::PointerEvent) {}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let chrome = store_value(WindowChrome::new(ResizeLimits::from(runtime.config())));

    let frame = create_memo(move |_| {
        runtime
            .frames()
            .into_iter()
            .find(|frame| frame.id == window_id)
    });

    let focus = move |_: web_sys::PointerEvent| {
        if let Some(command) = runtime
            .window_untracked(window_id)
            .as_ref()
            .and_then(focus_on_pointer_down)
        {
            runtime.dispatch_command(command);
        }
    };

    let begin_move = move |ev: web_sys::PointerEvent| {
        let sample = pointer_sample(&ev);
        if chrome
            .try_update_value(|chrome| chrome.titlebar_down(&sample))
            .unwrap_or(false)
        {
            try_set_pointer_capture(&ev);
            ev.prevent_default();
        }
    };
    let update_move = move |ev: web_sys::PointerEvent| {
        let sample = pointer_sample(&ev);
        let window = runtime.window_untracked(window_id);
        let command = chrome
            .try_update_value(|chrome| chrome.titlebar_move(window.as_ref(), &sample))
            .flatten();
        if let Some(command) = command {
            runtime.dispatch_command(command);
        }
    };
    let end_move = move |ev: web_sys::PointerEvent| {
        if chrome
            .try_update_value(|chrome| chrome.titlebar_up(ev.pointer_id()))
            .unwrap_or(false)
        {
            try_release_pointer_capture(&ev);
        }
    };
    let cancel_move = move |_: web_sys::PointerEvent| {
        chrome.update_value(|chrome| chrome.titlebar_cancel());
    };

    let minimize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_command(WindowCommand::Minimize { window_id });
    };
    let toggle_maximize = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_command(titlebar_toggle(window_id));
    };
    let close = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        runtime.dispatch_command(WindowCommand::Close { window_id });
    };
    let swallow_pointerdown = move |ev: web_sys::PointerEvent| ev.stop_propagation();

    let title = move || frame.get().map(|f| f.title).unwrap_or_default();
    let is_maximized = move || {
        frame
            .get()
            .map(|f| f.state == WindowState::Maximized)
            .unwrap_or(false)
    };

    view! {
        <section
            class=move || frame.get().map(|f| f.class_name()).unwrap_or_default()
            style=move || frame.get().map(|f| f.style()).unwrap_or_default()
            data-window-id=window_id.to_string()
            role="dialog"
            aria-label=title
            on:pointerdown=focus
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:pointermove=update_move
                on:pointerup=end_move
                on:pointercancel=cancel_move
                on:lostpointercapture=cancel_move
                on:dblclick=move |ev| {
                    stop_mouse_event(&ev);
                    runtime.dispatch_command(titlebar_toggle(window_id));
                }
            >
                <div class="titlebar-title">
                    {move || {
                        frame
                            .get()
                            .and_then(|f| f.icon)
                            .map(|icon| {
                                view! {
                                    <img class="titlebar-app-icon" src=icon alt="" aria-hidden="true" />
                                }
                            })
                    }}
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        type="button"
                        aria-label="Minimize window"
                        on:pointerdown=swallow_pointerdown
                        on:dblclick=move |ev| stop_mouse_event(&ev)
                        on:click=minimize
                    >
                        <ShellIcon glyph=ShellGlyph::WindowMinimize size=14 />
                    </button>
                    <button
                        type="button"
                        aria-label=move || {
                            if is_maximized() {
                                "Restore window"
                            } else {
                                "Maximize window"
                            }
                        }
                        on:pointerdown=swallow_pointerdown
                        on:dblclick=move |ev| stop_mouse_event(&ev)
                        on:click=toggle_maximize
                    >
                        {move || {
                            let glyph = if is_maximized() {
                                ShellGlyph::WindowRestore
                            } else {
                                ShellGlyph::WindowMaximize
                            };
                            view! { <ShellIcon glyph=glyph size=14 /> }
                        }}
                    </button>
                    <button
                        type="button"
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=swallow_pointerdown
                        on:dblclick=move |ev| stop_mouse_event(&ev)
                        on:click=close
                    >
                        <ShellIcon glyph=ShellGlyph::Dismiss size=14 />
                    </button>
                </div>
            </header>
            <div class="window-body">
                <WindowBody window_id=window_id />
            </div>
            <Show
                when=move || frame.get().map(|f| f.shows_resize_handles()).unwrap_or(false)
                fallback=|| ()
            >
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| {
                        view! { <WindowResizeHandle window_id=window_id edge=edge chrome=chrome /> }
                    })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeHandle(
    window_id: WindowId,
    edge: ResizeEdge,
    chrome: StoredValue<WindowChrome>,
) -> impl IntoView {
    let runtime = use_desktop_runtime();

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        let sample = pointer_sample(&ev);
        let Some(window) = runtime.window_untracked(window_id) else {
            return;
        };
        if chrome
            .try_update_value(|chrome| chrome.handle_down(edge, &window, &sample))
            .unwrap_or(false)
        {
            try_set_pointer_capture(&ev);
            ev.prevent_default();
            ev.stop_propagation();
        }
    };
    let on_pointermove = move |ev: web_sys::PointerEvent| {
        let sample = pointer_sample(&ev);
        let command = chrome
            .try_update_value(|chrome| chrome.handle_move(edge, window_id, &sample))
            .flatten();
        if let Some(command) = command {
            runtime.dispatch_command(command);
        }
    };
    let on_pointerup = move |ev: web_sys::PointerEvent| {
        if chrome
            .try_update_value(|chrome| chrome.handle_up(edge, ev.pointer_id()))
            .unwrap_or(false)
        {
            try_release_pointer_capture(&ev);
        }
    };
    let on_cancel = move |_: web_sys::PointerEvent| {
        chrome.update_value(|chrome| chrome.handle_cancel(edge));
    };

    view! {
        <div
            class=resize_edge_class(edge)
            data-edge=edge.code()
            aria-hidden="true"
            on:pointerdown=on_pointerdown
            on:pointermove=on_pointermove
            on:pointerup=on_pointerup
            on:pointercancel=on_cancel
            on:lostpointercapture=on_cancel
        />
    }
}

/// Mounts the app module once; the body stays alive while the frame moves or restacks.
#[component]
fn WindowBody(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let Some(window) = runtime.window_untracked(window_id) else {
        return view! { <p>"Closed"</p> }.into_view();
    };
    let module = runtime
        .registry
        .with_value(|registry| registry.get(&window.app_id).map(|descriptor| descriptor.module));

    match module {
        Some(module) => view! {
            <div class="window-body-content">
                {module.mount(AppMountContext {
                    app_id: window.app_id.clone(),
                    window_id: window_id.0,
                })}
            </div>
        }
        .into_view(),
        None => view! {
            <div class="window-body-content window-body-missing">
                <p>{format!("No application is registered for `{}`.", window.app_id)}</p>
            </div>
        }
        .into_view(),
    }
}
