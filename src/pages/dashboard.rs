//! Agenda: today's booked services.
//!
//! `?finish=<id>` opens the finish panel for one appointment; submitting it
//! posts to the finish action, which removes the appointment upstream.

use leptos::prelude::*;
use serde::Deserialize;

use super::ActionOutcome;
use crate::components::finish_panel::FinishPanel;
use crate::components::layout::{AppShell, render_document};
use crate::format::format_brl;
use crate::guard::{PageContext, PageOutcome};
use crate::nav::{Notice, Route};
use crate::net::endpoints;
use crate::net::types::ScheduleItem;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardProps {
    pub schedule: Vec<ScheduleItem>,
    /// Appointment shown in the finish panel.
    pub finishing: Option<ScheduleItem>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinishForm {
    pub schedule_id: String,
}

/// Fetch the agenda. Any failure other than a rejected session renders an
/// empty agenda.
pub async fn load(ctx: PageContext) -> PageOutcome<DashboardProps> {
    let schedule = match endpoints::fetch_schedule(ctx.api()).await {
        Ok(items) => items,
        Err(e) if e.is_unauthorized() => return PageOutcome::Redirect(Route::Login),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load schedule; showing empty agenda");
            Vec::new()
        }
    };
    let finishing = ctx
        .query("finish")
        .and_then(|id| schedule.iter().find(|item| item.id == id).cloned());

    PageOutcome::Render(DashboardProps { schedule, finishing, notice: ctx.notice() })
}

/// Mark a service as finished and return to the agenda, where it no longer
/// appears.
pub async fn finish(ctx: &PageContext, form: FinishForm) -> ActionOutcome<DashboardProps> {
    let schedule_id = form.schedule_id.trim();
    if schedule_id.is_empty() {
        return ActionOutcome::to(&Route::Dashboard);
    }
    match endpoints::finish_schedule(ctx.api(), schedule_id).await {
        Ok(()) => {
            tracing::info!(%schedule_id, "service finished");
            ActionOutcome::to(&Route::Dashboard)
        }
        Err(e) => ActionOutcome::failed(&e, &Route::Dashboard, Notice::FinishFailed),
    }
}

pub fn render(props: DashboardProps) -> String {
    render_document("BarberPRO - Minha barbearia", move || view! { <DashboardPage data=props/> })
}

#[component]
fn DashboardPage(data: DashboardProps) -> impl IntoView {
    let empty = data.schedule.is_empty();

    view! {
        <AppShell notice=data.notice>
            <header class="page-header">
                <h1>"Agenda"</h1>
                <a class="button" href={Route::NewSchedule.path()}>"Registrar"</a>
            </header>
            {empty.then(|| view! { <p class="empty">"Nenhum agendamento por enquanto."</p> })}
            <ul class="list">
                {data.schedule.into_iter().map(|item| view! { <ScheduleRow item=item/> }).collect_view()}
            </ul>
            {data.finishing.map(|item| view! { <FinishPanel item=item/> })}
        </AppShell>
    }
}

#[component]
fn ScheduleRow(item: ScheduleItem) -> impl IntoView {
    let href = format!("{}?finish={}", Route::Dashboard.path(), item.id);
    let price = format_brl(item.haircut.price.value());

    view! {
        <li>
            <a class="list__row" href=href>
                <span class="list__cell list__cell--strong">{item.customer}</span>
                <span class="list__cell">{item.haircut.name}</span>
                <span class="list__cell">{price}</span>
            </a>
        </li>
    }
}
