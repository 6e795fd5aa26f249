//! Plans: free vs premium, with checkout and billing portal redirects.

use leptos::prelude::*;

use super::{ActionOutcome, reload};
use crate::components::layout::{AppShell, render_document};
use crate::guard::{PageContext, PageOutcome};
use crate::nav::{Notice, Route};
use crate::net::endpoints;
use crate::net::types::FREE_HAIRCUT_LIMIT;

/// Display price of the premium plan.
pub const PREMIUM_PRICE: &str = "R$ 9,99";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlansProps {
    pub premium: bool,
    pub notice: Option<Notice>,
}

/// Premium status comes from the profile, not from the subscription check.
pub async fn load(ctx: PageContext) -> PageOutcome<PlansProps> {
    match ctx.session().refresh_user().await {
        Ok(user) => PageOutcome::Render(PlansProps { premium: user.is_premium(), notice: ctx.notice() }),
        Err(e) => PageOutcome::on_error(&e, Route::Dashboard),
    }
}

/// Start a hosted checkout and send the browser to it. Premium accounts
/// stay on the page.
pub async fn subscribe(ctx: &PageContext, checkout_url: &str) -> ActionOutcome<PlansProps> {
    let props = reload!(load(ctx.clone()).await);
    if props.premium {
        return ActionOutcome::to(&Route::Plans);
    }
    match endpoints::create_checkout(ctx.api()).await {
        Ok(session) => ActionOutcome::Redirect(format!("{checkout_url}{}", session.session_id)),
        Err(e) => ActionOutcome::failed(&e, &Route::Plans, Notice::CheckoutFailed),
    }
}

/// Open the billing portal. Only premium accounts have one.
pub async fn portal(ctx: &PageContext) -> ActionOutcome<PlansProps> {
    let props = reload!(load(ctx.clone()).await);
    if !props.premium {
        return ActionOutcome::to(&Route::Plans);
    }
    match endpoints::create_portal(ctx.api()).await {
        Ok(portal) => ActionOutcome::Redirect(portal.session_id),
        Err(e) => ActionOutcome::failed(&e, &Route::Plans, Notice::PortalFailed),
    }
}

pub fn render(props: PlansProps) -> String {
    render_document("BarberPRO - Sua assinatura", move || view! { <PlansPage data=props/> })
}

#[component]
fn PlansPage(data: PlansProps) -> impl IntoView {
    let premium = data.premium;
    let free_limit = format!("Criar apenas {FREE_HAIRCUT_LIMIT} modelos de corte");
    let subscribe_label = if premium { "Você já é premium" } else { "Assinar Plano" };

    view! {
        <AppShell notice=data.notice>
            <h1>"Planos"</h1>
            <div class="plans">
                <section class="plan">
                    <h2>"Plano Grátis"</h2>
                    <ul class="plan__features">
                        <li>"Registrar cortes"</li>
                        <li>{free_limit}</li>
                        <li>"Editar dados do perfil"</li>
                    </ul>
                </section>
                <section class="plan plan--premium">
                    <h2>"Premium"</h2>
                    <ul class="plan__features">
                        <li>"Registrar cortes ilimitados"</li>
                        <li>"Criar modelos ilimitados"</li>
                        <li>"Editar modelos de cortes"</li>
                        <li>"Editar dados do perfil"</li>
                        <li>"Receber todas atualizações do sistema"</li>
                    </ul>
                    <p class="plan__price">{PREMIUM_PRICE}</p>
                    <form method="post" action="/planos/subscribe">
                        <button class="button button--cta" type="submit" disabled=premium>{subscribe_label}</button>
                    </form>
                    {premium.then(|| view! {
                        <form method="post" action="/planos/portal">
                            <button class="button" type="submit">"ALTERAR ASSINATURA"</button>
                        </form>
                    })}
                </section>
            </div>
        </AppShell>
    }
}
