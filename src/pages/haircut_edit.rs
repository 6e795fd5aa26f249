//! Edit a haircut model. Saving requires an active subscription.

use leptos::prelude::*;
use serde::Deserialize;

use super::{ActionOutcome, reload};
use crate::components::layout::{AppShell, PremiumLink, render_document};
use crate::format::{parse_price, price_input_value};
use crate::guard::{PageContext, PageOutcome};
use crate::nav::{Notice, Route};
use crate::net::endpoints;
use crate::net::types::{HaircutUpdate, is_premium};

#[derive(Debug, Clone, PartialEq)]
pub struct HaircutEditProps {
    pub haircut_id: String,
    pub premium: bool,
    pub name: String,
    pub price: String,
    pub active: bool,
    pub notice: Option<Notice>,
}

impl HaircutEditProps {
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.premium
    }
}

/// The `status` checkbox is only sent when checked. `premium` echoes what
/// the page showed and never gates the update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HaircutEditForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub premium: bool,
}

/// Load the subscription check and the haircut named by the `id` path
/// parameter. Any failure returns to the catalog.
pub async fn load(ctx: PageContext) -> PageOutcome<HaircutEditProps> {
    let Some(id) = ctx.param("id").map(str::to_owned) else {
        return PageOutcome::Redirect(Route::Haircuts);
    };
    let check = match endpoints::check_subscription(ctx.api()).await {
        Ok(check) => check,
        Err(e) => return PageOutcome::on_error(&e, Route::Haircuts),
    };
    let haircut = match endpoints::fetch_haircut(ctx.api(), &id).await {
        Ok(haircut) => haircut,
        Err(e) => return PageOutcome::on_error(&e, Route::Haircuts),
    };

    PageOutcome::Render(HaircutEditProps {
        haircut_id: haircut.id,
        premium: is_premium(check.subscription.as_ref()),
        name: haircut.name,
        price: price_input_value(haircut.price.value()),
        active: haircut.status,
        notice: ctx.notice(),
    })
}

/// Save name, price and active flag.
///
/// Blank fields and an unparsable price are caught before any API call.
/// Without an active subscription, freshly checked, the update is refused.
pub async fn update(ctx: &PageContext, form: HaircutEditForm) -> ActionOutcome<HaircutEditProps> {
    let mut props = HaircutEditProps {
        haircut_id: ctx.param("id").unwrap_or_default().to_owned(),
        premium: form.premium,
        name: form.name,
        price: form.price,
        active: form.status.is_some(),
        notice: None,
    };

    let name = props.name.trim().to_owned();
    if name.is_empty() || props.price.trim().is_empty() {
        return ActionOutcome::Render(props);
    }
    let Some(price) = parse_price(&props.price) else {
        props.notice = Some(Notice::InvalidPrice);
        return ActionOutcome::Render(props);
    };

    let loaded = reload!(load(ctx.clone()).await);
    props.haircut_id = loaded.haircut_id;
    props.premium = loaded.premium;
    if !props.can_save() {
        props.notice = Some(Notice::PremiumRequired);
        return ActionOutcome::Render(props);
    }

    let update = HaircutUpdate { name: &name, price, status: props.active, haircut_id: &props.haircut_id };
    match endpoints::update_haircut(ctx.api(), &update).await {
        Ok(()) => {
            tracing::info!(haircut_id = %props.haircut_id, "haircut updated");
            ActionOutcome::with_notice(&Route::Haircut(props.haircut_id), Notice::HaircutUpdated)
        }
        Err(e) if e.is_unauthorized() => ActionOutcome::to(&Route::Login),
        Err(e) => {
            tracing::warn!(error = %e, "failed to update haircut");
            props.notice = Some(Notice::HaircutUpdateFailed);
            ActionOutcome::Render(props)
        }
    }
}

pub fn render(props: HaircutEditProps) -> String {
    render_document("Editando modelo de corte - BarberPRO", move || view! { <HaircutEditPage data=props/> })
}

#[component]
fn HaircutEditPage(data: HaircutEditProps) -> impl IntoView {
    let can_save = data.can_save();
    let action = Route::Haircut(data.haircut_id.clone()).path();

    view! {
        <AppShell notice=data.notice>
            <header class="page-header">
                <a class="button button--back" href={Route::Haircuts.path()}>"Voltar"</a>
                <h1>"Editar corte"</h1>
            </header>
            <form class="form form--card" method="post" action=action>
                <input class="input" type="text" name="name" placeholder="Nome do corte" value={data.name}/>
                <input class="input" type="text" name="price" placeholder="Corte 45.90" value={data.price}/>
                <input type="hidden" name="premium" value={data.premium.to_string()}/>
                <label class="form__switch">
                    <input type="checkbox" name="status" value="on" checked={data.active}/>
                    " Corte ativo"
                </label>
                <button class="button button--cta" type="submit" disabled={!can_save}>"Salvar"</button>
                {(!can_save).then(|| view! { <PremiumLink reason="Disponível apenas para assinantes."/> })}
            </form>
        </AppShell>
    }
}
