//! Navigation targets shared by session operations, guards and pages.

/// A page of the web client. Session operations return one of these instead
/// of navigating themselves; the caller decides what navigation means
/// (an HTTP redirect on the server, a message in the CLI).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    NewSchedule,
    Haircuts,
    NewHaircut,
    Haircut(String),
    Plans,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::NewSchedule => "/new".to_owned(),
            Self::Haircuts => "/haircuts".to_owned(),
            Self::NewHaircut => "/haircuts/new".to_owned(),
            Self::Haircut(id) => format!("/haircuts/{id}"),
            Self::Plans => "/planos".to_owned(),
        }
    }

    /// Path with a `notice` query parameter attached.
    #[must_use]
    pub fn with_notice(&self, notice: Notice) -> String {
        format!("{}?notice={}", self.path(), notice.code())
    }
}

/// Blocking user notification carried across a redirect as `?notice=<code>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    SignInFailed,
    SignUpFailed,
    SignUpDone,
    FinishFailed,
    ScheduleFailed,
    HaircutCreateFailed,
    HaircutLimitReached,
    HaircutUpdated,
    HaircutUpdateFailed,
    PremiumRequired,
    CheckoutFailed,
    PortalFailed,
    InvalidPrice,
}

impl Notice {
    const ALL: [Self; 13] = [
        Self::SignInFailed,
        Self::SignUpFailed,
        Self::SignUpDone,
        Self::FinishFailed,
        Self::ScheduleFailed,
        Self::HaircutCreateFailed,
        Self::HaircutLimitReached,
        Self::HaircutUpdated,
        Self::HaircutUpdateFailed,
        Self::PremiumRequired,
        Self::CheckoutFailed,
        Self::PortalFailed,
        Self::InvalidPrice,
    ];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::SignInFailed => "sign-in-failed",
            Self::SignUpFailed => "sign-up-failed",
            Self::SignUpDone => "sign-up-done",
            Self::FinishFailed => "finish-failed",
            Self::ScheduleFailed => "schedule-failed",
            Self::HaircutCreateFailed => "haircut-create-failed",
            Self::HaircutLimitReached => "haircut-limit",
            Self::HaircutUpdated => "haircut-updated",
            Self::HaircutUpdateFailed => "haircut-update-failed",
            Self::PremiumRequired => "premium-required",
            Self::CheckoutFailed => "checkout-failed",
            Self::PortalFailed => "portal-failed",
            Self::InvalidPrice => "invalid-price",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|notice| notice.code() == code)
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::SignInFailed => "Erro ao entrar. Verifique seu email e senha.",
            Self::SignUpFailed => "Erro ao criar sua conta.",
            Self::SignUpDone => "Conta criada! Faça seu login.",
            Self::FinishFailed => "Erro ao finalizar serviço.",
            Self::ScheduleFailed => "Erro ao registrar.",
            Self::HaircutCreateFailed => "Erro ao cadastrar esse modelo.",
            Self::HaircutLimitReached => "Você atingiu seu limite de corte.",
            Self::HaircutUpdated => "Corte atualizado!",
            Self::HaircutUpdateFailed => "Erro ao atualizar o corte.",
            Self::PremiumRequired => "Disponível apenas para assinantes premium.",
            Self::CheckoutFailed => "Erro ao iniciar a assinatura.",
            Self::PortalFailed => "Erro ao abrir o portal da assinatura.",
            Self::InvalidPrice => "Informe um valor válido, ex: 59.99",
        }
    }

    /// Whether the notice reports a failure rather than a success.
    #[must_use]
    pub fn is_error(self) -> bool {
        !matches!(self, Self::SignUpDone | Self::HaircutUpdated)
    }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
