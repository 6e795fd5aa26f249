//! Login page: email + password sign-in.

use leptos::prelude::*;
use serde::Deserialize;

use super::ActionOutcome;
use crate::components::layout::{AuthCard, render_document};
use crate::guard::{PageContext, PageOutcome};
use crate::nav::{Notice, Route};
use crate::session::AuthError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginProps {
    pub email: String,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn load(ctx: PageContext) -> PageOutcome<LoginProps> {
    PageOutcome::Render(LoginProps { email: String::new(), notice: ctx.notice() })
}

/// Sign in and go to the agenda. Blank fields re-render silently; a
/// rejected sign-in re-renders with the email kept.
pub async fn submit(ctx: &PageContext, form: LoginForm) -> ActionOutcome<LoginProps> {
    match ctx.session().sign_in(&form.email, &form.password).await {
        Ok(route) => ActionOutcome::to(&route),
        Err(AuthError::MissingField(_)) => ActionOutcome::Render(LoginProps { email: form.email, notice: None }),
        Err(e) => {
            tracing::info!(error = %e, "sign-in failed");
            ActionOutcome::Render(LoginProps { email: form.email, notice: Some(Notice::SignInFailed) })
        }
    }
}

pub fn render(props: LoginProps) -> String {
    render_document("BarberPRO - Faça login para acessar", move || view! { <LoginPage data=props/> })
}

#[component]
fn LoginPage(data: LoginProps) -> impl IntoView {
    view! {
        <AuthCard notice=data.notice>
            <form class="form" method="post" action="/login">
                <input class="input" type="email" name="email" placeholder="email@email.com" value={data.email}/>
                <input class="input" type="password" name="password" placeholder="********"/>
                <button class="button button--cta" type="submit">"Acessar"</button>
            </form>
            <p class="auth__switch">
                "Ainda não possui conta? "
                <a href={Route::Register.path()}>"Cadastre-se"</a>
            </p>
        </AuthCard>
    }
}
