//! Desktop shell UI composition and interaction surfaces.

mod start_menu;
mod taskbar;
mod window;

use desktop_app_contract::ApplicationId;
use leptos::*;

use self::{start_menu::StartMenu, taskbar::Taskbar, window::DesktopWindow};

use crate::model::{PointerKind, PointerPosition, PointerSample, ResizeEdge, WindowId};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[derive(Debug, Clone, PartialEq, Eq)]
struct LauncherEntry {
    app_id: ApplicationId,
    name: String,
    icon: String,
    description: String,
}

fn launcher_entries(runtime: DesktopRuntimeContext, query: &str) -> Vec<LauncherEntry> {
    runtime.registry.with_value(|registry| {
        registry
            .search(query)
            .into_iter()
            .map(|descriptor| LauncherEntry {
                app_id: descriptor.manifest.id.clone(),
                name: descriptor.manifest.name.clone(),
                icon: descriptor.manifest.icon.clone(),
                description: descriptor.manifest.description.clone(),
            })
            .collect()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DesktopContextMenuState {
    x: i32,
    y: i32,
}

#[component]
/// Renders the desktop surface, icons, window layer, start menu and taskbar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let desktop_context_menu = create_rw_signal(None::<DesktopContextMenuState>);
    let window_ids = Signal::derive(move || {
        runtime
            .windows
            .with(|windows| windows.iter().map(|w| w.id).collect::<Vec<WindowId>>())
    });

    let escape_listener = window_event_listener(ev::keydown, move |ev| {
        if ev.default_prevented() || ev.key() != "Escape" {
            return;
        }
        if desktop_context_menu.get_untracked().is_some() {
            ev.prevent_default();
            desktop_context_menu.set(None);
        }
        if runtime.start_menu_open.get_untracked() {
            ev.prevent_default();
            runtime.start_menu_open.set(false);
        }
    });
    on_cleanup(move || escape_listener.remove());

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            style=move || format!("--taskbar-height:{}px;", runtime.config().taskbar_height)
        >
            <div
                class="desktop-surface"
                on:mousedown=move |_| {
                    desktop_context_menu.set(None);
                    runtime.start_menu_open.set(false);
                }
                on:contextmenu=move |ev| {
                    ev.prevent_default();
                    runtime.start_menu_open.set(false);
                    desktop_context_menu.set(Some(DesktopContextMenuState {
                        x: ev.client_x(),
                        y: ev.client_y(),
                    }));
                }
            >
                <div class="desktop-icons" role="list">
                    {launcher_entries(runtime, "")
                        .into_iter()
                        .map(|entry| {
                            let app_id = entry.app_id.clone();
                            view! {
                                <button
                                    type="button"
                                    class="desktop-icon"
                                    role="listitem"
                                    title=entry.description
                                    on:dblclick=move |_| runtime.launch(&app_id)
                                >
                                    <img src=entry.icon alt=entry.name.clone() />
                                    <span>{entry.name}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <div class="desktop-window-layer">
                    <For each=move || window_ids.get() key=|id| id.0 let:window_id>
                        <DesktopWindow window_id=window_id />
                    </For>
                </div>
            </div>

            <DesktopContextMenu state=desktop_context_menu />
            <Show when=move || runtime.start_menu_open.get() fallback=|| ()>
                <StartMenu />
            </Show>
            <Taskbar />
        </div>
    }
}

#[component]
fn DesktopContextMenu(state: RwSignal<Option<DesktopContextMenuState>>) -> impl IntoView {
    let runtime = use_desktop_runtime();

    view! {
        <Show when=move || state.get().is_some() fallback=|| ()>
            {move || {
                let Some(position) = state.get() else {
                    return ().into_view();
                };
                view! {
                    <div
                        class="desktop-context-menu"
                        role="menu"
                        style=format!("left:{}px;top:{}px;", position.x, position.y)
                        on:mousedown=move |ev| ev.stop_propagation()
                    >
                        {launcher_entries(runtime, "")
                            .into_iter()
                            .map(|entry| {
                                let app_id = entry.app_id.clone();
                                view! {
                                    <button
                                        type="button"
                                        role="menuitem"
                                        on:click=move |_| {
                                            state.set(None);
                                            runtime.launch(&app_id);
                                        }
                                    >
                                        {format!("Open {}", entry.name)}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_view()
            }}
        </Show>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_sample(ev: &web_sys::PointerEvent) -> PointerSample {
    PointerSample {
        pointer_id: ev.pointer_id(),
        kind: PointerKind::from_dom(&ev.pointer_type()),
        button: ev.button(),
        is_primary: ev.is_primary(),
        position: PointerPosition {
            x: ev.client_x(),
            y: ev.client_y(),
        },
    }
}

fn resize_edge_class(edge: ResizeEdge) -> String {
    format!("window-resize-handle edge-{}", edge.code())
}
