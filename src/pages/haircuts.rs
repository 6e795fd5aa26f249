//! Haircut catalog, active or inactive.

use leptos::prelude::*;

use crate::components::layout::{AppShell, render_document};
use crate::format::format_brl;
use crate::guard::{PageContext, PageOutcome};
use crate::nav::{Notice, Route};
use crate::net::endpoints;
use crate::net::types::Haircut;

/// `?status=` value selecting the inactive list.
pub const INACTIVE: &str = "inactive";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HaircutsProps {
    pub haircuts: Vec<Haircut>,
    pub active: bool,
    pub notice: Option<Notice>,
}

/// Load the catalog. A `null` active list or a failure goes back to the
/// agenda; a `null` inactive list is just empty.
pub async fn load(ctx: PageContext) -> PageOutcome<HaircutsProps> {
    let active = ctx.query("status") != Some(INACTIVE);
    match endpoints::fetch_haircuts(ctx.api(), active).await {
        Ok(Some(haircuts)) => PageOutcome::Render(HaircutsProps { haircuts, active, notice: ctx.notice() }),
        Ok(None) if active => PageOutcome::Redirect(Route::Dashboard),
        Ok(None) => PageOutcome::Render(HaircutsProps { haircuts: Vec::new(), active, notice: ctx.notice() }),
        Err(e) => PageOutcome::on_error(&e, Route::Dashboard),
    }
}

pub fn render(props: HaircutsProps) -> String {
    render_document("Modelos de corte - Minha Barbearia", move || view! { <HaircutsPage data=props/> })
}

#[component]
fn HaircutsPage(data: HaircutsProps) -> impl IntoView {
    let (toggle_href, toggle_label) = if data.active {
        (format!("{}?status={INACTIVE}", Route::Haircuts.path()), "Ver inativos")
    } else {
        (Route::Haircuts.path(), "Ver ativos")
    };
    let heading = if data.active { "ATIVOS" } else { "INATIVOS" };

    view! {
        <AppShell notice=data.notice>
            <header class="page-header">
                <h1>"Modelos de corte"</h1>
                <a class="button" href={Route::NewHaircut.path()}>"Cadastrar corte"</a>
                <span class="page-header__status">{heading}</span>
                <a class="page-header__toggle" href=toggle_href>{toggle_label}</a>
            </header>
            <ul class="list">
                {data
                    .haircuts
                    .into_iter()
                    .map(|haircut| {
                        let href = Route::Haircut(haircut.id.clone()).path();
                        let price = format!("Preço: {}", format_brl(haircut.price.value()));
                        view! {
                            <li>
                                <a class="list__row" href=href>
                                    <span class="list__cell list__cell--strong">{haircut.name}</span>
                                    <span class="list__cell">{price}</span>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </AppShell>
    }
}
