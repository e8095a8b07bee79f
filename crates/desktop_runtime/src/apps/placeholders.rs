//! Placeholder views for the built-in apps. They keep local state only; the virtual filesystem
//! and session store are not wired into the desktop.

use desktop_app_contract::AppMountContext;
use leptos::*;

/// Mounts the Terminal placeholder app.
pub(super) fn mount_terminal_app(context: AppMountContext) -> View {
    view! { <TerminalPlaceholderApp context=context /> }.into_view()
}

/// Mounts the Files placeholder app.
pub(super) fn mount_files_app(_: AppMountContext) -> View {
    view! {
        <div class="app-shell app-files-shell">
            <div class="app-toolbar" role="group" aria-label="Files placeholder controls">
                <button type="button" class="app-action" disabled=true>"Up"</button>
                <span class="app-files-path">"/home/user"</span>
            </div>
            <ul class="app-files-list" role="list">
                <li class="app-files-entry dir">"Documents"</li>
                <li class="app-files-entry dir">"Downloads"</li>
                <li class="app-files-entry dir">"Pictures"</li>
                <li class="app-files-entry file">"readme.txt"</li>
            </ul>
            <div class="app-statusbar">
                <span>"4 items"</span>
                <span>"Virtual filesystem not mounted"</span>
            </div>
        </div>
    }
    .into_view()
}

/// Mounts the Settings placeholder app.
pub(super) fn mount_settings_app(_: AppMountContext) -> View {
    view! { <SettingsPlaceholderApp /> }.into_view()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TerminalReply {
    Lines(Vec<String>),
    Clear,
}

const TERMINAL_HELP: &[&str] = &[
    "Available commands:",
    "  help          show this list",
    "  echo <text>   print text",
    "  whoami        print the window this shell runs in",
    "  clear         clear the screen",
];

fn run_terminal_line(line: &str, context: &AppMountContext) -> TerminalReply {
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "" => TerminalReply::Lines(Vec::new()),
        "help" => TerminalReply::Lines(TERMINAL_HELP.iter().map(|s| s.to_string()).collect()),
        "echo" => TerminalReply::Lines(vec![rest.trim().to_string()]),
        "whoami" => TerminalReply::Lines(vec![format!(
            "user@{} (win-{})",
            context.app_id, context.window_id
        )]),
        "clear" => TerminalReply::Clear,
        other => TerminalReply::Lines(vec![format!("{other}: command not found")]),
    }
}

#[component]
fn TerminalPlaceholderApp(context: AppMountContext) -> impl IntoView {
    let lines = create_rw_signal(vec!["BrowserOS terminal. Type `help`.".to_string()]);
    let input = create_rw_signal(String::new());
    let context = store_value(context);

    let submit = move || {
        let line = input.get_untracked();
        input.set(String::new());
        let reply = context.with_value(|context| run_terminal_line(&line, context));
        lines.update(|lines| match reply {
            TerminalReply::Clear => lines.clear(),
            TerminalReply::Lines(output) => {
                lines.push(format!("$ {line}"));
                lines.extend(output);
            }
        });
    };

    view! {
        <div class="app-shell app-terminal-shell">
            <pre class="app-terminal-output">{move || lines.get().join("\n")}</pre>
            <form
                class="app-terminal-prompt"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <span aria-hidden="true">"$"</span>
                <input
                    type="text"
                    aria-label="Terminal input"
                    autocomplete="off"
                    spellcheck="false"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
            </form>
        </div>
    }
}

const WALLPAPERS: &[(&str, &str)] = &[
    ("Dark Navy", "linear-gradient(135deg, #1e1e2e 0%, #313244 100%)"),
    ("Midnight Blue", "linear-gradient(135deg, #0a0a1a 0%, #1a1a3e 100%)"),
    ("Forest", "linear-gradient(135deg, #0d1b0d 0%, #1a3a1a 100%)"),
    ("Solid Dark", "#11111b"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct SettingsPlaceholderState {
    theme: String,
    wallpaper: usize,
    status: String,
}

impl Default for SettingsPlaceholderState {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            wallpaper: 0,
            status: "Changes are kept for this window only".to_string(),
        }
    }
}

#[component]
fn SettingsPlaceholderApp() -> impl IntoView {
    let state = create_rw_signal(SettingsPlaceholderState::default());

    view! {
        <div class="app-shell app-settings-shell">
            <section class="app-settings-section">
                <h2>"Appearance"</h2>
                <label>
                    "Theme "
                    <select
                        prop:value=move || state.get().theme
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.theme = value);
                        }
                    >
                        <option value="dark">"Dark"</option>
                        <option value="light">"Light"</option>
                    </select>
                </label>
                <div class="app-settings-wallpapers" role="group" aria-label="Wallpaper">
                    {WALLPAPERS
                        .iter()
                        .enumerate()
                        .map(|(index, (label, value))| {
                            view! {
                                <button
                                    type="button"
                                    class="app-settings-swatch"
                                    class:active=move || state.get().wallpaper == index
                                    style=format!("background:{value}")
                                    title=*label
                                    aria-label=*label
                                    on:click=move |_| state.update(|s| s.wallpaper = index)
                                ></button>
                            }
                        })
                        .collect_view()}
                </div>
            </section>
            <div class="app-statusbar">
                <span>{move || {
                    let snapshot = state.get();
                    format!("{} | {}", snapshot.theme, WALLPAPERS[snapshot.wallpaper].0)
                }}</span>
                <span>{move || state.get().status}</span>
            </div>
        </div>
    }
}
