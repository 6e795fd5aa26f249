//! New haircut model, limited to [`FREE_HAIRCUT_LIMIT`] for free accounts.

use leptos::prelude::*;
use serde::Deserialize;

use super::{ActionOutcome, reload};
use crate::components::layout::{AppShell, PremiumLink, render_document};
use crate::format::parse_price;
use crate::guard::{PageContext, PageOutcome};
use crate::nav::{Notice, Route};
use crate::net::endpoints;
use crate::net::types::{FREE_HAIRCUT_LIMIT, is_premium};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HaircutNewProps {
    pub premium: bool,
    /// Haircut models the account already has.
    pub count: u64,
    pub name: String,
    pub price: String,
    pub notice: Option<Notice>,
}

impl HaircutNewProps {
    /// A free account at or over the limit cannot create more models.
    #[must_use]
    pub fn limit_reached(&self) -> bool {
        !self.premium && self.count >= FREE_HAIRCUT_LIMIT
    }
}

/// `premium` and `count` echo what the page showed, so a blank submission
/// can be shown again as it was. They never gate the create call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HaircutNewForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub premium: bool,
    #[serde(default)]
    pub count: u64,
}

pub async fn load(ctx: PageContext) -> PageOutcome<HaircutNewProps> {
    let check = match endpoints::check_subscription(ctx.api()).await {
        Ok(check) => check,
        Err(e) => return PageOutcome::on_error(&e, Route::Dashboard),
    };
    let count = match endpoints::count_haircuts(ctx.api()).await {
        Ok(count) => count,
        Err(e) => return PageOutcome::on_error(&e, Route::Dashboard),
    };

    PageOutcome::Render(HaircutNewProps {
        premium: is_premium(check.subscription.as_ref()),
        count,
        notice: ctx.notice(),
        ..HaircutNewProps::default()
    })
}

/// Create the model and return to the catalog.
///
/// Blank fields re-render silently and an unparsable price re-renders with a
/// notice, both without calling the API. Past that, the limit is checked
/// against freshly loaded values before any create call.
pub async fn create(ctx: &PageContext, form: HaircutNewForm) -> ActionOutcome<HaircutNewProps> {
    let mut props = HaircutNewProps {
        premium: form.premium,
        count: form.count,
        name: form.name,
        price: form.price,
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
    props.premium = loaded.premium;
    props.count = loaded.count;
    if props.limit_reached() {
        props.notice = Some(Notice::HaircutLimitReached);
        return ActionOutcome::Render(props);
    }

    match endpoints::create_haircut(ctx.api(), &name, price).await {
        Ok(()) => {
            tracing::info!(%name, "haircut created");
            ActionOutcome::to(&Route::Haircuts)
        }
        Err(e) if e.is_unauthorized() => ActionOutcome::to(&Route::Login),
        Err(e) => {
            tracing::warn!(error = %e, "failed to create haircut");
            props.notice = Some(Notice::HaircutCreateFailed);
            ActionOutcome::Render(props)
        }
    }
}

pub fn render(props: HaircutNewProps) -> String {
    render_document("BarberPRO - Novo modelo de corte", move || view! { <HaircutNewPage data=props/> })
}

#[component]
fn HaircutNewPage(data: HaircutNewProps) -> impl IntoView {
    let blocked = data.limit_reached();

    view! {
        <AppShell notice=data.notice>
            <header class="page-header">
                <a class="button button--back" href={Route::Haircuts.path()}>"Voltar"</a>
                <h1>"Modelos de corte"</h1>
            </header>
            <form class="form form--card" method="post" action={Route::NewHaircut.path()}>
                <h2>"Cadastrar modelo"</h2>
                <input class="input" type="text" name="name" placeholder="Nome do corte" value={data.name}/>
                <input class="input" type="text" name="price" placeholder="Valor do corte ex: 59.99" value={data.price}/>
                <input type="hidden" name="premium" value={data.premium.to_string()}/>
                <input type="hidden" name="count" value={data.count.to_string()}/>
                <button class="button button--cta" type="submit" disabled=blocked>"Cadastrar"</button>
                {blocked.then(|| view! { <PremiumLink reason="Você atingiu seu limite de corte."/> })}
            </form>
        </AppShell>
    }
}
