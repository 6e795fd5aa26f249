//! Registration page.

use leptos::prelude::*;
use serde::Deserialize;

use super::ActionOutcome;
use crate::components::layout::{AuthCard, render_document};
use crate::guard::{PageContext, PageOutcome};
use crate::nav::{Notice, Route};
use crate::session::AuthError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterProps {
    pub name: String,
    pub email: String,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn load(ctx: PageContext) -> PageOutcome<RegisterProps> {
    PageOutcome::Render(RegisterProps { notice: ctx.notice(), ..RegisterProps::default() })
}

/// Create the account, then send the user to log in. Registration never
/// signs in by itself.
pub async fn submit(ctx: &PageContext, form: RegisterForm) -> ActionOutcome<RegisterProps> {
    match ctx.session().sign_up(&form.name, &form.email, &form.password).await {
        Ok(route) => ActionOutcome::with_notice(&route, Notice::SignUpDone),
        Err(e) => {
            let notice = match e {
                AuthError::MissingField(_) => None,
                other => {
                    tracing::info!(error = %other, "sign-up failed");
                    Some(Notice::SignUpFailed)
                }
            };
            ActionOutcome::Render(RegisterProps { name: form.name, email: form.email, notice })
        }
    }
}

pub fn render(props: RegisterProps) -> String {
    render_document("BarberPRO - Crie sua conta", move || view! { <RegisterPage data=props/> })
}

#[component]
fn RegisterPage(data: RegisterProps) -> impl IntoView {
    view! {
        <AuthCard notice=data.notice>
            <form class="form" method="post" action="/register">
                <input class="input" type="text" name="name" placeholder="Nome da barbearia" value={data.name}/>
                <input class="input" type="email" name="email" placeholder="email@email.com" value={data.email}/>
                <input class="input" type="password" name="password" placeholder="********"/>
                <button class="button button--cta" type="submit">"Cadastrar"</button>
            </form>
            <p class="auth__switch">
                "Já possui uma conta? "
                <a href={Route::Login.path()}>"Faça login"</a>
            </p>
        </AuthCard>
    }
}
