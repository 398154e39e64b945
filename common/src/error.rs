//! Error kinds raised by the intake workflow.
//!
//! `FormError` covers failures of an operation (bad input, transport, store);
//! its `Display` output is the message shown in the form's inline message
//! area. `Rejection` covers commands refused by the state machine itself.

use thiserror::Error;

/// Coarse classification used by callers that only care about the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Extraction,
    Network,
    Store,
    DuplicateKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Veuillez sélectionner un fichier.")]
    NoFileSelected,

    #[error("Le fichier « {0} » est vide.")]
    EmptyFile(String),

    #[error("Impossible de lire le fichier : {0}")]
    UnreadableFile(String),

    /// The extraction service answered with a non-success status.
    #[error("Erreur lors de l'envoi du fichier.")]
    ExtractionStatus { status: u16 },

    /// The extraction service answered 2xx with a body that is not usable.
    #[error("Réponse d'extraction invalide : {0}")]
    MalformedResponse(String),

    #[error("Erreur réseau : {0}")]
    Network(String),

    #[error("Erreur : {0}")]
    Store(String),

    #[error("Ce numéro CIN ({cin}) semble déjà exister. Veuillez le vérifier avant de continuer.")]
    DuplicateKey { cin: String },
}

impl FormError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormError::NoFileSelected | FormError::EmptyFile(_) | FormError::UnreadableFile(_) => {
                ErrorKind::Validation
            }
            FormError::ExtractionStatus { .. } | FormError::MalformedResponse(_) => {
                ErrorKind::Extraction
            }
            FormError::Network(_) => ErrorKind::Network,
            FormError::Store(_) => ErrorKind::Store,
            FormError::DuplicateKey { .. } => ErrorKind::DuplicateKey,
        }
    }
}

/// A command the current state does not accept. The edit buffer is never
/// touched when a command is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Editing or saving before an extraction has been accepted.
    #[error("Veuillez d’abord soumettre votre CIN.")]
    Locked,

    /// An extraction or a save is already in flight.
    #[error("Une opération est déjà en cours, veuillez patienter.")]
    Busy,

    #[error("Aucune fiche à la position {0}.")]
    NoSuchRecord(usize),

    #[error("Champ inconnu : {0}")]
    UnknownField(String),

    /// The command was accepted for evaluation but its precondition failed.
    #[error(transparent)]
    Invalid(#[from] FormError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_their_cause() {
        assert_eq!(
            FormError::Network("connection refused".into()).to_string(),
            "Erreur réseau : connection refused"
        );
        assert_eq!(
            FormError::Store("permission denied".into()).to_string(),
            "Erreur : permission denied"
        );
        assert!(FormError::DuplicateKey { cin: "101".into() }
            .to_string()
            .contains("(101)"));
    }

    #[test]
    fn extraction_status_message_is_generic() {
        let err = FormError::ExtractionStatus { status: 502 };
        assert_eq!(err.to_string(), "Erreur lors de l'envoi du fichier.");
        assert_eq!(err.kind(), ErrorKind::Extraction);
    }

    #[test]
    fn invalid_rejection_is_transparent() {
        let rejection = Rejection::from(FormError::NoFileSelected);
        assert_eq!(rejection.to_string(), "Veuillez sélectionner un fichier.");
    }
}
