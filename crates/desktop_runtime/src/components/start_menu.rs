use super::*;
use crate::icons::{ShellGlyph, ShellIcon};

#[component]
pub(super) fn StartMenu() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let query = create_rw_signal(String::new());
    let results = Signal::derive(move || query.with(|query| launcher_entries(runtime, query)));

    view! {
        <div
            id="desktop-launcher-menu"
            class="start-menu"
            role="dialog"
            aria-label="Start menu"
            style=move || format!("bottom:{}px;", runtime.config().taskbar_height)
        >
            <label class="start-menu-search">
                <ShellIcon glyph=ShellGlyph::Search size=16 />
                <input
                    type="search"
                    placeholder="Search apps…"
                    aria-label="Search apps"
                    autofocus=true
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </label>
            <div class="start-menu-section-label">"Apps"</div>
            <Show
                when=move || results.with(|results| !results.is_empty())
                fallback=|| view! { <p class="start-menu-empty">"No apps found"</p> }
            >
                <div class="start-menu-apps" role="list">
                    {move || {
                        results
                            .get()
                            .into_iter()
                            .map(|entry| {
                                let app_id = entry.app_id.clone();
                                view! {
                                    <button
                                        type="button"
                                        role="listitem"
                                        class="start-menu-app"
                                        title=entry.description
                                        on:click=move |_| runtime.launch(&app_id)
                                    >
                                        <img src=entry.icon alt=entry.name.clone() />
                                        <span>{entry.name}</span>
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
