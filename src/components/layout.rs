//! Document shell, sidebar navigation and notice banner.

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;

use leptos::prelude::*;

use crate::nav::{Notice, Route};

/// Render `body` inside a full HTML document.
///
/// Views are built under a fresh reactive owner that is dropped once the
/// markup is produced; nothing here outlives the request.
pub fn render_document<F, V>(title: &str, body: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    let markup = owner.with(|| body().to_html());
    format!(
        "<!DOCTYPE html><html lang=\"pt-BR\"><head><meta charset=\"utf-8\"/>\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"/>\
         <title>{title}</title><link rel=\"stylesheet\" href=\"/static/app.css\"/></head>\
         <body>{markup}</body></html>"
    )
}

/// Layout for signed-in pages: sidebar on the left, content on the right.
#[component]
pub fn AppShell(notice: Option<Notice>, children: Children) -> impl IntoView {
    view! {
        <div class="app">
            <Sidebar/>
            <main class="app__content">
                <NoticeBanner notice=notice/>
                {children()}
            </main>
        </div>
    }
}

/// Centered card used by the login and registration pages.
#[component]
pub fn AuthCard(notice: Option<Notice>, children: Children) -> impl IntoView {
    view! {
        <div class="auth">
            <div class="auth__card">
                <h1 class="brand">"Barber" <span class="brand__accent">"PRO"</span></h1>
                <NoticeBanner notice=notice/>
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let links = [
        (Route::Dashboard, "Agenda"),
        (Route::Haircuts, "Cortes"),
        (Route::Plans, "Planos"),
    ];

    view! {
        <nav class="sidebar">
            <a class="brand" href={Route::Dashboard.path()}>
                "Barber" <span class="brand__accent">"PRO"</span>
            </a>
            <ul class="sidebar__links">
                {links
                    .into_iter()
                    .map(|(route, label)| {
                        view! {
                            <li>
                                <a class="sidebar__link" href={route.path()}>{label}</a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <form class="sidebar__logout" method="post" action="/logout">
                <button type="submit" class="button button--ghost">"Sair"</button>
            </form>
        </nav>
    }
}

/// Banner for a notice carried across a redirect or set on re-render.
#[component]
pub fn NoticeBanner(notice: Option<Notice>) -> impl IntoView {
    notice.map(|notice| {
        let class = if notice.is_error() { "notice notice--error" } else { "notice notice--ok" };
        view! { <div class=class role="alert">{notice.message()}</div> }
    })
}

/// "Seja Premium" call to action pointing at the plans page.
#[component]
pub fn PremiumLink(#[prop(into)] reason: String) -> impl IntoView {
    view! {
        <p class="premium-cta">
            {reason}
            " "
            <a class="premium-cta__link" href={Route::Plans.path()}>"Seja Premium"</a>
        </p>
    }
}
