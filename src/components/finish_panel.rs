//! Confirmation panel for finishing a service on the agenda.

use leptos::prelude::*;

use crate::format::format_brl;
use crate::nav::Route;
use crate::net::types::ScheduleItem;

/// Shows the appointment details and posts its id to the finish action.
/// Closing is a plain link back to the agenda.
#[component]
pub fn FinishPanel(item: ScheduleItem) -> impl IntoView {
    let price = format_brl(item.haircut.price.value());

    view! {
        <section class="panel" aria-label="Próximo">
            <header class="panel__header">
                <h2>"Próximo"</h2>
                <a class="panel__close" href={Route::Dashboard.path()} aria-label="Fechar">"×"</a>
            </header>
            <p class="panel__row panel__row--customer">{item.customer}</p>
            <p class="panel__row panel__row--haircut">{item.haircut.name}</p>
            <p class="panel__row panel__row--price">{price}</p>
            <form method="post" action="/dashboard/finish">
                <input type="hidden" name="schedule_id" value={item.id}/>
                <button type="submit" class="button button--cta">"Finalizar serviço"</button>
            </form>
        </section>
    }
}
