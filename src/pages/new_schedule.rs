//! New appointment: pick a customer name and an active haircut.

use leptos::prelude::*;
use serde::Deserialize;

use super::{ActionOutcome, reload};
use crate::components::layout::{AppShell, render_document};
use crate::guard::{PageContext, PageOutcome};
use crate::nav::{Notice, Route};
use crate::net::endpoints;
use crate::net::types::Haircut;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewScheduleProps {
    pub haircuts: Vec<Haircut>,
    pub customer: String,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewScheduleForm {
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub haircut_id: String,
}

/// Load the active catalog. A `null` catalog or a failure sends the user
/// back to the agenda.
pub async fn load(ctx: PageContext) -> PageOutcome<NewScheduleProps> {
    match endpoints::fetch_haircuts(ctx.api(), true).await {
        Ok(Some(haircuts)) => {
            PageOutcome::Render(NewScheduleProps { haircuts, customer: String::new(), notice: ctx.notice() })
        }
        Ok(None) => PageOutcome::Redirect(Route::Dashboard),
        Err(e) => PageOutcome::on_error(&e, Route::Dashboard),
    }
}

/// Book the appointment. An empty customer or haircut does nothing but show
/// the form again.
pub async fn register(ctx: &PageContext, form: NewScheduleForm) -> ActionOutcome<NewScheduleProps> {
    let customer = form.customer.trim();
    let haircut_id = form.haircut_id.trim();
    if customer.is_empty() || haircut_id.is_empty() {
        let props = reload!(load(ctx.clone()).await);
        return ActionOutcome::Render(NewScheduleProps { customer: form.customer, ..props });
    }

    match endpoints::create_schedule(ctx.api(), customer, haircut_id).await {
        Ok(()) => ActionOutcome::to(&Route::Dashboard),
        Err(e) if e.is_unauthorized() => ActionOutcome::to(&Route::Login),
        Err(e) => {
            tracing::warn!(error = %e, "failed to create schedule");
            let props = reload!(load(ctx.clone()).await);
            ActionOutcome::Render(NewScheduleProps {
                customer: form.customer,
                notice: Some(Notice::ScheduleFailed),
                ..props
            })
        }
    }
}

pub fn render(props: NewScheduleProps) -> String {
    render_document("BarberPRO - Novo agendamento", move || view! { <NewSchedulePage data=props/> })
}

#[component]
fn NewSchedulePage(data: NewScheduleProps) -> impl IntoView {
    view! {
        <AppShell notice=data.notice>
            <a class="button button--back" href={Route::Dashboard.path()}>"Voltar"</a>
            <h1>"Novo corte"</h1>
            <form class="form form--card" method="post" action={Route::NewSchedule.path()}>
                <input class="input" type="text" name="customer" placeholder="Nome do cliente" value={data.customer}/>
                <select class="input" name="haircut_id">
                    {data
                        .haircuts
                        .into_iter()
                        .map(|haircut| view! { <option value={haircut.id}>{haircut.name}</option> })
                        .collect_view()}
                </select>
                <button class="button button--cta" type="submit">"Cadastrar"</button>
            </form>
        </AppShell>
    }
}
