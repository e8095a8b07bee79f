use std::time::Duration;

use super::*;
use crate::{
    compositor::{taskbar_activation, taskbar_entries, TaskbarEntry},
    icons::{ShellGlyph, ShellIcon},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaskbarClockSnapshot {
    hour: u32,
    minute: u32,
}

impl TaskbarClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self { hour: 0, minute: 0 }
        }
    }

    fn label(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

fn taskbar_window_aria_label(entry: &TaskbarEntry) -> String {
    let mut parts = vec![entry.title.clone()];
    if entry.is_focused {
        parts.push("focused".to_string());
    }
    if entry.is_minimized {
        parts.push("minimized".to_string());
    }
    parts.join(", ")
}

#[component]
pub(super) fn Taskbar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let clock_now = create_rw_signal(TaskbarClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(TaskbarClockSnapshot::now()),
        Duration::from_secs(10),
    ) {
        on_cleanup(move || interval.clear());
    }

    let activate = move |window_id: WindowId| {
        if let Some(window) = runtime.window_untracked(window_id) {
            runtime.dispatch_all(taskbar_activation(&window));
        }
    };

    view! {
        <footer
            class="taskbar"
            role="toolbar"
            aria-label="Taskbar"
            style=move || format!("height:{}px;", runtime.config().taskbar_height)
        >
            <button
                type="button"
                class=move || {
                    if runtime.start_menu_open.get() {
                        "taskbar-start active"
                    } else {
                        "taskbar-start"
                    }
                }
                aria-label="Open start menu"
                aria-expanded=move || runtime.start_menu_open.get().to_string()
                title="Start"
                on:click=move |_| runtime.start_menu_open.update(|open| *open = !*open)
            >
                <ShellIcon glyph=ShellGlyph::Launcher size=20 />
            </button>
            <div class="taskbar-separator" aria-hidden="true"></div>
            <div class="taskbar-windows" role="list">
                {move || {
                    runtime
                        .windows
                        .with(|windows| taskbar_entries(windows))
                        .into_iter()
                        .map(|entry| {
                            let window_id = entry.id;
                            let aria_label = taskbar_window_aria_label(&entry);
                            view! {
                                <button
                                    type="button"
                                    role="listitem"
                                    class=entry.class_name()
                                    title=entry.title.clone()
                                    aria-label=aria_label
                                    aria-pressed=entry.is_focused.to_string()
                                    on:click=move |_| activate(window_id)
                                >
                                    {entry
                                        .icon
                                        .map(|icon| {
                                            view! { <img src=icon alt="" aria-hidden="true" /> }
                                        })}
                                    <span>{entry.title}</span>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="taskbar-clock" aria-live="off">
                {move || clock_now.get().label()}
            </div>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::ApplicationId;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{WindowRecord, WindowRect, WindowState};

    #[test]
    fn clock_label_is_zero_padded() {
        let snapshot = TaskbarClockSnapshot { hour: 7, minute: 5 };
        assert_eq!(snapshot.label(), "07:05");
    }

    #[test]
    fn aria_label_describes_window_state() {
        let window = WindowRecord {
            id: WindowId(2),
            app_id: ApplicationId::trusted("com.browseros.terminal"),
            title: "Terminal".to_string(),
            icon: None,
            rect: WindowRect::new(0, 0, 640, 480),
            z_index: 1,
            state: WindowState::Minimized,
            is_focused: false,
        };
        let entries = taskbar_entries(&[window]);
        assert_eq!(taskbar_window_aria_label(&entries[0]), "Terminal, minimized");
    }
}
