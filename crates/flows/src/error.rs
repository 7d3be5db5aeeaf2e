use boothlog_client::ApiError;
use boothlog_core::error::CoreError;

use crate::session::SessionError;
use crate::submission::ModalError;

/// User-facing message when the booth's report actions cannot be loaded.
pub const LOAD_ACTIONS_FAILED: &str = "Falha ao carregar as ações.";

/// Errors from the booth-side flows.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// No stored check-in. The caller must send the user back to the
    /// entry point without showing anything of the page.
    #[error("Nenhum check-in ativo. Faça o check-in para continuar.")]
    NotCheckedIn,

    /// A page-level load failed. The message is shown as-is.
    #[error("{0}")]
    LoadFailed(String),

    /// The requested report action is not offered to this staff member.
    #[error("Ação '{0}' não disponível neste estande.")]
    UnknownAction(String),

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Modal(#[from] ModalError),
}

/// Errors from checking in or switching booths.
///
/// None of them touch the stored session.
#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("Por favor, insira o código do estande.")]
    MissingBoothCode,

    #[error("Por favor, insira o código pessoal.")]
    MissingPersonalCode,

    /// The backend refused the booth/personal code pair. Its message is
    /// displayed verbatim.
    #[error(transparent)]
    Rejected(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
