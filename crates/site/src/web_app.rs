use desktop_runtime::{DesktopProvider, DesktopShell, WindowManagerConfig};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

const WINDOW_MANAGER_CONFIG_JSON: &str = include_str!("../window_manager.json");

fn window_manager_config() -> WindowManagerConfig {
    match WindowManagerConfig::from_json(WINDOW_MANAGER_CONFIG_JSON) {
        Ok(config) => config,
        Err(err) => {
            logging::warn!("falling back to default window manager config: {err}");
            WindowManagerConfig::default()
        }
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="BrowserOS" />
        <Meta name="description" content="A desktop environment simulated in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider config=window_manager_config()>
            <DesktopShell />
        </DesktopProvider>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    let location = use_location();

    view! {
        <section class="site-not-found">
            <h1>"Nothing here"</h1>
            <p>{move || format!("`{}` is not part of the desktop.", location.pathname.get())}</p>
            <A href="/">"Back to the desktop"</A>
        </section>
    }
}
